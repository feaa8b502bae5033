//! Table sources and the best-effort loader.

use std::fmt;
use std::fs;
use std::io::Read;
use std::path::PathBuf;

use crate::{parse_table, MedicineRecord};

/// Error fetching the raw reference table
///
/// Only surfaced by [`fetch_table`]; [`load`] logs it and degrades to an
/// empty table.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read table file {path}: {source}", path = path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read table stream: {0}")]
    Stream(std::io::Error),
    #[error("failed to fetch table from {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("table request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// Where the reference table comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSource {
    /// A file on the local filesystem
    Path(PathBuf),
    /// An `http://` or `https://` location
    Url(String),
    /// Table text already held by the caller
    Text(String),
}

impl TableSource {
    /// Classify a location string as a URL or a filesystem path.
    pub fn from_location(location: &str) -> Self {
        let location = location.trim();
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            TableSource::Url(location.to_string())
        } else {
            TableSource::Path(PathBuf::from(location))
        }
    }
}

impl fmt::Display for TableSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableSource::Path(path) => write!(f, "{}", path.display()),
            TableSource::Url(url) => f.write_str(url),
            TableSource::Text(text) => write!(f, "<inline table, {} bytes>", text.len()),
        }
    }
}

/// Retrieve the raw table text
///
/// Makes a single attempt with no retry. A URL answering with a non-success
/// status is treated as a failure rather than parsed as a table.
///
/// # Errors
///
/// Returns [`LoadError`] when the file cannot be read, the request fails, or
/// the server answers with an error status.
pub fn fetch_table(source: &TableSource) -> Result<String, LoadError> {
    match source {
        TableSource::Path(path) => fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.clone(),
            source,
        }),
        TableSource::Url(url) => {
            let response = reqwest::blocking::get(url).map_err(|source| LoadError::Http {
                url: url.clone(),
                source,
            })?;

            let status = response.status();
            if !status.is_success() {
                return Err(LoadError::Status {
                    url: url.clone(),
                    status: status.as_u16(),
                });
            }

            response.text().map_err(|source| LoadError::Http {
                url: url.clone(),
                source,
            })
        }
        TableSource::Text(text) => Ok(text.clone()),
    }
}

/// Load and parse the reference table
///
/// Never fails: a fetch error is logged and an empty table is returned, so
/// callers can treat "no data" as an ordinary state.
pub fn load(source: &TableSource) -> Vec<MedicineRecord> {
    match fetch_table(source) {
        Ok(text) => {
            let records = parse_table(&text);
            tracing::info!("Loaded {} medicine records from {}", records.len(), source);
            records
        }
        Err(e) => {
            tracing::error!("Error loading medicine data: {}", e);
            Vec::new()
        }
    }
}

/// Load the table from a caller-supplied byte stream
///
/// Same contract as [`load`]: read failures (including invalid UTF-8) are
/// logged and produce an empty table.
pub fn load_from_reader<R: Read>(mut reader: R) -> Vec<MedicineRecord> {
    let mut text = String::new();
    if let Err(e) = reader.read_to_string(&mut text) {
        tracing::error!("Error loading medicine data: {}", LoadError::Stream(e));
        return Vec::new();
    }
    parse_table(&text)
}
