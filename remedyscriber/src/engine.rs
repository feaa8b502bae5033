//! # Recommendation Engine
//!
//! Turns a [`PatientInfo`] into a short, ranked list of candidate medicines
//! from the reference table.
//!
//! ## Pipeline
//!
//! For each selected symptom, in the order given:
//! 1. **Normalize** query and table symptoms (lower-case, drop qualifiers)
//! 2. **Filter** rows whose symptom contains, or is contained in, the query
//!    and whose age group equals the patient's bucket
//! 3. **Deduplicate** on `name-ageGroup` across the whole request
//! 4. **Score** each surviving row
//! 5. **Enrich** with frequency, description and warnings
//!
//! Then the combined list is sorted by confidence (ties keep insertion
//! order) and cut to [`MAX_RECOMMENDATIONS`].
//!
//! ## Scoring
//!
//! | Factor                                   | Adjustment |
//! |------------------------------------------|------------|
//! | Base                                     | 85         |
//! | Normalized symptoms identical            | +10        |
//! | Position within this symptom's matches   | -3 each    |
//! | Pregnant or nursing                      | -5         |
//!
//! The result is clamped to `60..=98`.

use std::collections::HashSet;

use remedyscraper::MedicineRecord;
use serde::{Deserialize, Serialize};

use crate::extract::{self, TextExtractor};
use crate::patient::PatientInfo;

/// Upper bound on the number of recommendations returned.
pub const MAX_RECOMMENDATIONS: usize = 5;

pub const BASE_CONFIDENCE: i32 = 85;
pub const EXACT_MATCH_BONUS: i32 = 10;
pub const MATCH_POSITION_PENALTY: i32 = 3;
pub const PREGNANCY_NURSING_PENALTY: i32 = 5;
pub const MIN_CONFIDENCE: u8 = 60;
pub const MAX_CONFIDENCE: u8 = 98;

/// A ranked candidate medicine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// 1-based position at which the candidate was found in this request
    pub id: u32,
    /// First ingredient of the medicine field
    pub name: String,
    /// Dosage text exactly as in the table
    pub dosage: String,
    /// "every N hrs" phrase from the dosage, or "As directed"
    pub frequency: String,
    /// Heuristic rank score in `60..=98`
    pub confidence: u8,
    pub description: String,
    pub warnings: Vec<String>,
    /// Symptom label of the matched row
    pub symptom: String,
    /// Age group label of the matched row
    pub age_group: String,
}

/// Matches patients against a reference table
///
/// Holds the compiled text patterns so they are built once per process
/// rather than once per query.
#[derive(Debug, Clone, Default)]
pub struct Recommender {
    extractor: TextExtractor,
}

impl Recommender {
    pub fn new() -> Self {
        Recommender {
            extractor: TextExtractor::new(),
        }
    }

    pub fn extractor(&self) -> &TextExtractor {
        &self.extractor
    }

    /// Rank medicines for a patient
    ///
    /// Pure with respect to its inputs: the only state is the per-call
    /// dedup set. An empty table or unmatched symptoms give an empty list.
    ///
    /// # Arguments
    ///
    /// * `records` - Loaded reference table
    /// * `patient` - The request; not validated here
    ///
    /// # Returns
    ///
    /// At most [`MAX_RECOMMENDATIONS`] items, confidence non-increasing
    pub fn recommend(&self, records: &[MedicineRecord], patient: &PatientInfo) -> Vec<Recommendation> {
        let age_group = patient.age_group().label();

        // Table symptoms are normalized once, not once per query symptom
        let normalized_table: Vec<String> = records
            .iter()
            .map(|record| self.extractor.normalize_symptom(&record.symptom))
            .collect();

        let mut recommendations: Vec<Recommendation> = Vec::new();
        let mut seen_medicines: HashSet<String> = HashSet::new();

        for symptom in &patient.symptoms {
            let query = self.extractor.normalize_symptom(symptom);

            let matches = records
                .iter()
                .zip(&normalized_table)
                .filter(|(record, record_symptom)| {
                    symptoms_overlap(record_symptom, &query) && record.age_group == age_group
                });

            // Position counts rows later dropped as duplicates
            for (position, (record, record_symptom)) in matches.enumerate() {
                let name = extract::medicine_name(&record.medicine);
                let medicine_key = format!("{}-{}", name, record.age_group);

                if !seen_medicines.insert(medicine_key) {
                    tracing::trace!("Skipping duplicate {} for symptom {}", name, symptom);
                    continue;
                }

                let confidence = score(record_symptom == &query, position, patient);

                recommendations.push(Recommendation {
                    id: recommendations.len() as u32 + 1,
                    frequency: self.extractor.frequency(&record.dosage),
                    description: extract::describe(&record.medicine).to_string(),
                    warnings: extract::warnings(&record.medicine, &record.dosage, patient),
                    name,
                    confidence,
                    dosage: record.dosage.clone(),
                    symptom: record.symptom.clone(),
                    age_group: record.age_group.clone(),
                });
            }
        }

        tracing::debug!(
            "Found {} candidate medicines for {} symptoms ({})",
            recommendations.len(),
            patient.symptoms.len(),
            age_group
        );

        // Stable: equal confidences keep the order they were found in
        recommendations.sort_by(|a, b| b.confidence.cmp(&a.confidence));
        recommendations.truncate(MAX_RECOMMENDATIONS);
        recommendations
    }
}

/// Rank medicines with a freshly built [`Recommender`].
///
/// Prefer keeping a `Recommender` (or a [`crate::Formulary`]) around when
/// answering more than one query.
pub fn recommend(records: &[MedicineRecord], patient: &PatientInfo) -> Vec<Recommendation> {
    Recommender::new().recommend(records, patient)
}

/// Bidirectional containment between normalized symptoms.
fn symptoms_overlap(record_symptom: &str, query: &str) -> bool {
    record_symptom.contains(query) || query.contains(record_symptom)
}

/// Confidence for one match, clamped to `MIN_CONFIDENCE..=MAX_CONFIDENCE`.
fn score(exact_match: bool, position: usize, patient: &PatientInfo) -> u8 {
    let mut confidence = BASE_CONFIDENCE;

    if exact_match {
        confidence += EXACT_MATCH_BONUS;
    }

    let position = i32::try_from(position).unwrap_or(i32::MAX / MATCH_POSITION_PENALTY);
    confidence = confidence.saturating_sub(position.saturating_mul(MATCH_POSITION_PENALTY));

    if patient.is_pregnant || patient.is_nursing {
        confidence -= PREGNANCY_NURSING_PENALTY;
    }

    // Clamped into u8 range, so the cast is lossless
    confidence.clamp(MIN_CONFIDENCE as i32, MAX_CONFIDENCE as i32) as u8
}
