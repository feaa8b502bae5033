//! Patient input: age buckets, the symptom catalog and intake gating.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Symptoms offered for selection, in display order.
pub const COMMON_SYMPTOMS: [&str; 14] = [
    "Fever",
    "Headache",
    "Cough",
    "Sore Throat",
    "Runny Nose",
    "Fatigue",
    "Body Aches",
    "Nausea",
    "Diarrhea",
    "Vomiting",
    "Dizziness",
    "Chest Pain",
    "Shortness of Breath",
    "Abdominal Pain",
];

/// Age bucket used as an exact-match key against the reference table
///
/// The labels overlap at 3 and 6 years ("1-3" / "3-6", "3-6" / "6-15").
/// [`AgeGroup::from_age`] checks the buckets from youngest to oldest, so a
/// child of exactly 3 lands in `OneToThree` and one of exactly 6 in
/// `ThreeToSix`. Table rows are keyed on these labels, so the resolution
/// order must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "Below 1 year")]
    BelowOne,
    #[serde(rename = "1-3 years")]
    OneToThree,
    #[serde(rename = "3-6 years")]
    ThreeToSix,
    #[serde(rename = "6-15 years")]
    SixToFifteen,
    #[serde(rename = "Above 15 years")]
    AboveFifteen,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 5] = [
        AgeGroup::BelowOne,
        AgeGroup::OneToThree,
        AgeGroup::ThreeToSix,
        AgeGroup::SixToFifteen,
        AgeGroup::AboveFifteen,
    ];

    /// Bucket an age in whole years.
    pub fn from_age(age: u32) -> Self {
        if age < 1 {
            AgeGroup::BelowOne
        } else if age <= 3 {
            AgeGroup::OneToThree
        } else if age <= 6 {
            AgeGroup::ThreeToSix
        } else if age <= 15 {
            AgeGroup::SixToFifteen
        } else {
            AgeGroup::AboveFifteen
        }
    }

    /// The label exactly as it appears in the reference table.
    pub fn label(self) -> &'static str {
        match self {
            AgeGroup::BelowOne => "Below 1 year",
            AgeGroup::OneToThree => "1-3 years",
            AgeGroup::ThreeToSix => "3-6 years",
            AgeGroup::SixToFifteen => "6-15 years",
            AgeGroup::AboveFifteen => "Above 15 years",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Reasons a patient form is not ready to submit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    #[error("select at least one symptom")]
    NoSymptoms,
    #[error("gender is required")]
    MissingGender,
    #[error("symptom duration is required")]
    MissingDuration,
}

/// One recommendation request
///
/// `gender` and `duration` are collected for the record but never influence
/// matching or scoring.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientInfo {
    /// Selected symptoms in the order the user picked them, without repeats
    pub symptoms: Vec<String>,
    /// Age in whole years
    pub age: u32,
    pub gender: String,
    /// Free text, e.g. "2 days"
    pub duration: String,
    pub is_pregnant: bool,
    pub is_nursing: bool,
}

impl PatientInfo {
    pub fn age_group(&self) -> AgeGroup {
        AgeGroup::from_age(self.age)
    }

    /// Check the form is complete before it is handed to the engine
    ///
    /// The engine accepts any `PatientInfo`; this gate belongs to whoever
    /// collects the input.
    ///
    /// # Errors
    ///
    /// The first missing piece, checked in form order.
    pub fn validate(&self) -> Result<(), IntakeError> {
        if self.symptoms.iter().all(|s| s.trim().is_empty()) {
            return Err(IntakeError::NoSymptoms);
        }
        if self.gender.trim().is_empty() {
            return Err(IntakeError::MissingGender);
        }
        if self.duration.trim().is_empty() {
            return Err(IntakeError::MissingDuration);
        }
        Ok(())
    }
}

/// Filter the symptom catalog for a search box
///
/// Returns catalog entries containing `term` (case-insensitive) that are not
/// already in `selected`, keeping catalog order. An empty term matches
/// everything not yet selected.
pub fn search_symptoms<S: AsRef<str>>(term: &str, selected: &[S]) -> Vec<&'static str> {
    let term = term.to_lowercase();
    COMMON_SYMPTOMS
        .iter()
        .copied()
        .filter(|symptom| symptom.to_lowercase().contains(&term))
        .filter(|symptom| !selected.iter().any(|s| AsRef::<str>::as_ref(s) == *symptom))
        .collect()
}
