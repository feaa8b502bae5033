//! Runtime configuration, resolved once at startup.
//!
//! Values come from command-line flags, falling back to environment variables
//! (a `.env` file is read first) and then to built-in defaults. Nothing below
//! `main` reads the environment again.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use remedyscraper::TableSource;

pub const DEFAULT_TABLE: &str = "data/medicine-dataset.csv";

#[derive(Parser, Debug)]
#[command(name = "remedyscriber")]
#[command(about = "Rank candidate medicines for a set of symptoms")]
pub struct Cli {
    /// Reference table: a file path or an http(s) URL
    #[arg(long, global = true, env = "REMEDY_TABLE", default_value = DEFAULT_TABLE)]
    pub table: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Recommend medicines for a patient
    Recommend(RecommendArgs),
    /// List selectable symptoms
    Symptoms {
        /// Only show symptoms containing this text
        #[arg(long)]
        search: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct RecommendArgs {
    /// Symptom to match; repeat for several
    #[arg(long = "symptom", short = 's', required = true)]
    pub symptoms: Vec<String>,

    /// Age in whole years
    #[arg(long)]
    pub age: u32,

    #[arg(long)]
    pub gender: String,

    /// How long the symptoms have lasted, e.g. "2 days"
    #[arg(long)]
    pub duration: String,

    #[arg(long)]
    pub pregnant: bool,

    #[arg(long)]
    pub nursing: bool,

    #[arg(long, value_enum, env = "REMEDY_FORMAT", default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write output to this file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// Settings shared by every subcommand.
#[derive(Clone, Debug)]
pub struct AppConfig {
    table_source: TableSource,
}

impl AppConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        AppConfig {
            table_source: TableSource::from_location(&cli.table),
        }
    }

    pub fn table_source(&self) -> &TableSource {
        &self.table_source
    }
}
