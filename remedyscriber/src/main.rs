//! # Remedyscriber CLI
//!
//! Command-line front end for the recommendation engine.
//!
//! ## Usage
//!
//! ```bash
//! remedyscriber --table data/medicine-dataset.csv recommend \
//!     -s Fever -s "Runny Nose" --age 4 --gender female --duration "2 days"
//! remedyscriber symptoms --search pain
//! ```
//!
//! ## Environment Variables
//! - `REMEDY_TABLE`: reference table path or URL (default `data/medicine-dataset.csv`)
//! - `REMEDY_FORMAT`: `text`, `json` or `csv` (default `text`)
//! - `RUST_LOG`: log filter; logs go to stderr

mod config;

use std::fs::File;
use std::io::{self, Write};

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::{AppConfig, Cli, Commands, OutputFormat, RecommendArgs};
use remedyscriber::{search_symptoms, to_json, write_csv, Formulary, PatientInfo, Recommendation};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("remedyscriber=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_cli(&cli);

    match cli.command {
        Commands::Symptoms { search } => {
            let no_selection: [&str; 0] = [];
            for symptom in search_symptoms(search.as_deref().unwrap_or(""), &no_selection) {
                println!("{}", symptom);
            }
        }
        Commands::Recommend(args) => run_recommend(&config, args)?,
    }

    Ok(())
}

fn run_recommend(config: &AppConfig, args: RecommendArgs) -> anyhow::Result<()> {
    let patient = PatientInfo {
        symptoms: args.symptoms,
        age: args.age,
        gender: args.gender,
        duration: args.duration,
        is_pregnant: args.pregnant,
        is_nursing: args.nursing,
    };

    // Gate the form before touching the table
    patient.validate()?;

    let mut formulary = Formulary::load(config.table_source());
    tracing::info!("Reference table holds {} rows", formulary.len());

    let recommendations = formulary.recommend(patient);

    let sink: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };

    match args.format {
        OutputFormat::Text => write_text(recommendations, sink)?,
        OutputFormat::Json => {
            let mut sink = sink;
            writeln!(sink, "{}", to_json(recommendations)?)?;
        }
        OutputFormat::Csv => write_csv(recommendations, sink)?,
    }

    if let Some(path) = &args.output {
        tracing::info!("Output saved to: {}", path.display());
    }

    Ok(())
}

fn write_text(recommendations: &[Recommendation], mut sink: Box<dyn Write>) -> io::Result<()> {
    if recommendations.is_empty() {
        writeln!(sink, "No matching medicines found for these symptoms.")?;
        return Ok(());
    }

    for (rank, rec) in recommendations.iter().enumerate() {
        writeln!(sink, "{}. {} ({}% match)", rank + 1, rec.name, rec.confidence)?;
        writeln!(sink, "   {}", rec.description)?;
        writeln!(sink, "   Dosage:    {}", rec.dosage)?;
        writeln!(sink, "   Frequency: {}", rec.frequency)?;
        writeln!(sink, "   For:       {} ({})", rec.symptom, rec.age_group)?;
        for warning in &rec.warnings {
            writeln!(sink, "   ! {}", warning)?;
        }
        writeln!(sink)?;
    }

    writeln!(
        sink,
        "These suggestions are not medical advice. Consult a healthcare professional."
    )?;
    sink.flush()
}
