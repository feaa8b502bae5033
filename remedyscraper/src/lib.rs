//! # Remedyscraper - Reference Table Loader
//!
//! This crate turns the flat symptom/medicine reference table into structured
//! [`MedicineRecord`]s that the recommendation engine matches against.
//!
//! ## Table Format
//!
//! Plain comma-separated UTF-8 text. The first line is a header and is always
//! discarded, whatever it contains. Every following line reads:
//!
//! ```text
//! symptom,ageGroup,medicine,dosage[,more dosage text...]
//! ```
//!
//! Fields past the fourth are glued back onto the dosage with commas, so
//! dosage instructions may themselves contain commas. No quoting is
//! recognised: a `"` is an ordinary character.
//!
//! ## Failure Model
//!
//! Loading never fails from the caller's point of view:
//! - **Malformed rows** (fewer than 4 fields) are skipped
//! - **Unreachable sources** are logged and produce an empty table
//!
//! An empty table is a valid, if degenerate, state: every query against it
//! simply returns no recommendations.
//!
//! ## Usage
//!
//! ```no_run
//! use remedyscraper::{load, TableSource};
//!
//! let records = load(&TableSource::from_location("data/medicine-dataset.csv"));
//! println!("{} rows available", records.len());
//! ```

mod source;

pub use source::{fetch_table, load, load_from_reader, LoadError, TableSource};

use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

/// Minimum number of comma-separated parts a data line needs.
const MIN_FIELDS: usize = 4;

/// One row of the reference table
///
/// Maps a symptom and an age bucket to a medicine and its dosing
/// instructions. Records are immutable once loaded and carry no identity
/// beyond their position in the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineRecord {
    /// Free-text symptom label, possibly qualified, e.g. "Fever (high)"
    pub symptom: String,

    /// Age bucket label, e.g. "1-3 years"
    pub age_group: String,

    /// Raw medicine field, possibly combining ingredients with `+` or `±`
    pub medicine: String,

    /// Free-text dosing and frequency instructions
    pub dosage: String,
}

impl MedicineRecord {
    /// Build a record from its four raw fields, trimming each one.
    pub fn new(
        symptom: impl AsRef<str>,
        age_group: impl AsRef<str>,
        medicine: impl AsRef<str>,
        dosage: impl AsRef<str>,
    ) -> Self {
        MedicineRecord {
            symptom: symptom.as_ref().trim().to_string(),
            age_group: age_group.as_ref().trim().to_string(),
            medicine: medicine.as_ref().trim().to_string(),
            dosage: dosage.as_ref().trim().to_string(),
        }
    }
}

/// Parse reference table text into records
///
/// ## Algorithm
///
/// 1. Trim the whole text and read it line by line
/// 2. Drop the first line (header)
/// 3. Split each line on `,` and require at least 4 parts
/// 4. Rejoin parts 4.. with `,` to rebuild the dosage text
/// 5. Trim all four fields
///
/// Short lines are skipped and only reported at debug level.
///
/// # Arguments
///
/// * `text` - Complete table contents, header included
///
/// # Returns
///
/// Records in table order
///
/// # Examples
///
/// ```
/// let table = "symptom,age,medicine,dosage\nFever,1-3 years,Paracetamol,5 ml, every 6 hrs";
/// let records = remedyscraper::parse_table(table);
/// assert_eq!(records[0].dosage, "5 ml, every 6 hrs");
/// ```
pub fn parse_table(text: &str) -> Vec<MedicineRecord> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .from_reader(text.trim().as_bytes());

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (index, row) in reader.records().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                tracing::debug!("Skipping unreadable row {}: {}", index + 2, e);
                skipped += 1;
                continue;
            }
        };

        if row.len() < MIN_FIELDS {
            tracing::debug!(
                "Skipping row {} with {} of {} fields",
                index + 2,
                row.len(),
                MIN_FIELDS
            );
            skipped += 1;
            continue;
        }

        // Dosage text may contain commas of its own
        let dosage = row.iter().skip(3).collect::<Vec<_>>().join(",");

        records.push(MedicineRecord::new(&row[0], &row[1], &row[2], dosage));
    }

    if skipped > 0 {
        tracing::debug!("Parsed {} records, skipped {} malformed rows", records.len(), skipped);
    }

    records
}
