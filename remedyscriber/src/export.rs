//! Tabular and JSON export of recommendation lists.

use std::io::Write;

use csv::Writer;
use serde::Serialize;

use crate::engine::Recommendation;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush export: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One exported CSV row
///
/// Warnings are flattened into a single "; "-separated column since CSV has
/// no nested values.
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "Rank")]
    rank: usize,

    #[serde(rename = "Medicine")]
    name: &'a str,

    #[serde(rename = "Dosage")]
    dosage: &'a str,

    #[serde(rename = "Frequency")]
    frequency: &'a str,

    #[serde(rename = "Confidence")]
    confidence: u8,

    #[serde(rename = "Description")]
    description: &'a str,

    #[serde(rename = "Warnings")]
    warnings: String,

    #[serde(rename = "Symptom")]
    symptom: &'a str,

    #[serde(rename = "Age Group")]
    age_group: &'a str,
}

impl<'a> From<(usize, &'a Recommendation)> for ExportRow<'a> {
    fn from((index, rec): (usize, &'a Recommendation)) -> Self {
        ExportRow {
            rank: index + 1,
            name: &rec.name,
            dosage: &rec.dosage,
            frequency: &rec.frequency,
            confidence: rec.confidence,
            description: &rec.description,
            warnings: rec.warnings.join("; "),
            symptom: &rec.symptom,
            age_group: &rec.age_group,
        }
    }
}

/// Write recommendations as CSV with a header row, in ranked order
///
/// # Errors
///
/// Returns [`ExportError`] if a row cannot be written or the sink fails to flush.
pub fn write_csv<W: Write>(recommendations: &[Recommendation], sink: W) -> Result<(), ExportError> {
    let mut writer = Writer::from_writer(sink);

    for row in recommendations.iter().enumerate().map(ExportRow::from) {
        writer.serialize(row)?;
    }

    writer.flush()?;
    Ok(())
}

/// Pretty-printed JSON array of recommendations.
pub fn to_json(recommendations: &[Recommendation]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(recommendations)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Recommendation> {
        vec![
            Recommendation {
                id: 2,
                name: "Ibuprofen".into(),
                dosage: "200mg, every 8 hrs".into(),
                frequency: "every 8 hrs".into(),
                confidence: 95,
                description: "Anti-inflammatory, pain reliever, and fever reducer (NSAID)".into(),
                warnings: vec![
                    "Take with food to avoid stomach upset".into(),
                    "Avoid if you have stomach ulcers or kidney disease".into(),
                ],
                symptom: "Headache".into(),
                age_group: "Above 15 years".into(),
            },
            Recommendation {
                id: 1,
                name: "Honey".into(),
                dosage: "1 tsp".into(),
                frequency: "As directed".into(),
                confidence: 82,
                description: "Medication for symptom relief".into(),
                warnings: vec![],
                symptom: "Cough".into(),
                age_group: "Above 15 years".into(),
            },
        ]
    }

    #[test]
    fn csv_has_header_and_ranked_rows() {
        let mut buffer = Vec::new();
        write_csv(&sample(), &mut buffer).expect("export");
        let text = String::from_utf8(buffer).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "Rank,Medicine,Dosage,Frequency,Confidence,Description,Warnings,Symptom,Age Group"
        );
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("1,Ibuprofen,\"200mg, every 8 hrs\",every 8 hrs,95,"));
        assert!(lines[1].contains(
            "Take with food to avoid stomach upset; Avoid if you have stomach ulcers or kidney disease"
        ));
        assert_eq!(
            lines[2],
            "2,Honey,1 tsp,As directed,82,Medication for symptom relief,,Cough,Above 15 years"
        );
    }

    #[test]
    fn csv_round_trips_through_reader() {
        let mut buffer = Vec::new();
        write_csv(&sample(), &mut buffer).expect("export");

        let mut reader = csv::Reader::from_reader(buffer.as_slice());
        let rows: Vec<csv::StringRecord> = reader.records().collect::<Result<_, _>>().expect("read");
        assert_eq!(&rows[0][2], "200mg, every 8 hrs");
        assert_eq!(&rows[1][6], "");
    }

    #[test]
    fn empty_list_exports_nothing() {
        let mut buffer = Vec::new();
        write_csv(&[], &mut buffer).expect("export");
        assert!(buffer.is_empty());
        assert_eq!(to_json(&[]).expect("json"), "[]");
    }

    #[test]
    fn json_keeps_ranked_order() {
        let json = to_json(&sample()).expect("json");
        let value: serde_json::Value = serde_json::from_str(&json).expect("parse");

        assert_eq!(value[0]["name"], "Ibuprofen");
        assert_eq!(value[1]["ageGroup"], "Above 15 years");
        assert_eq!(value[1]["warnings"].as_array().map(Vec::len), Some(0));
    }
}
