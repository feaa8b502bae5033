//! Text extraction from reference table fields.
//!
//! Pulls a display name and a dosing frequency out of free-text medicine and
//! dosage fields, classifies medicines into a short description, and derives
//! the safety warnings shown next to each recommendation.

use regex::Regex;

use crate::patient::PatientInfo;

/// Frequency shown when the dosage text carries no "every N hrs" directive.
pub const DEFAULT_FREQUENCY: &str = "As directed";

/// Description used when no drug-class keyword matches.
pub const FALLBACK_DESCRIPTION: &str = "Medication for symptom relief";

/// Drug-class descriptions, checked in order; the first hit wins.
const DESCRIPTIONS: [(&[&str], &str); 7] = [
    (
        &["paracetamol", "acetaminophen"],
        "Pain reliever and fever reducer (analgesic and antipyretic)",
    ),
    (
        &["ibuprofen"],
        "Anti-inflammatory, pain reliever, and fever reducer (NSAID)",
    ),
    (&["amoxicillin"], "Antibiotic used to treat bacterial infections"),
    (&["cetirizine"], "Antihistamine for allergy symptoms"),
    (&["diphenhydramine"], "Antihistamine for allergies and sleep aid"),
    (
        &["saline"],
        "Sterile salt water solution for cleansing and moisturizing",
    ),
    (
        &["steroid", "hydrocortisone"],
        "Anti-inflammatory steroid to reduce swelling and redness",
    ),
];

/// Drug-class warnings. Every matching class contributes, in this order.
const CLASS_WARNINGS: [(&[&str], [&str; 2]); 5] = [
    (
        &["paracetamol", "acetaminophen"],
        [
            "Do not exceed 4000mg per day",
            "Avoid if you have liver disease",
        ],
    ),
    (
        &["ibuprofen"],
        [
            "Take with food to avoid stomach upset",
            "Avoid if you have stomach ulcers or kidney disease",
        ],
    ),
    (
        &["amoxicillin", "antibiotic"],
        [
            "Complete the full course even if symptoms improve",
            "May cause diarrhea or upset stomach",
        ],
    ),
    (
        &["cetirizine", "diphenhydramine", "antihistamine"],
        [
            "May cause drowsiness - avoid driving",
            "Avoid alcohol while taking this medication",
        ],
    ),
    (
        &["steroid", "cortisone", "hydrocortisone"],
        [
            "Do not use for extended periods without medical supervision",
            "May thin skin with prolonged use",
        ],
    ),
];

pub const PREGNANCY_WARNING: &str =
    "⚠️ You indicated pregnancy - consult your doctor before taking any medication";
pub const NURSING_WARNING: &str =
    "⚠️ You indicated nursing - consult your doctor as medication may pass to baby";
pub const INFANT_WARNING: &str =
    "⚠️ For infants, always consult a pediatrician before administering any medication";
pub const PROFESSIONAL_DOSING_WARNING: &str =
    "Consult a healthcare professional for proper dosing";

/// Dosage phrases that defer dosing to a professional.
const PROFESSIONAL_DOSING_TERMS: [&str; 2] = ["pediatrician", "clinician"];

/// Compiled patterns for symptom and dosage text
///
/// Build once and reuse for every query; compiling the patterns is the only
/// non-trivial cost here.
#[derive(Debug, Clone)]
pub struct TextExtractor {
    /// Parenthetical qualifier plus the whitespace around it
    parenthetical_pattern: Regex,

    /// "every 6 hrs", "Every 4-6 hours", ...
    frequency_pattern: Regex,
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor {
    pub fn new() -> Self {
        TextExtractor {
            parenthetical_pattern: Regex::new(r"\s*\(.*?\)\s*")
                .expect("parenthetical pattern is valid"),
            frequency_pattern: Regex::new(r"(?i)every\s+[0-9-]+\s+(?:hrs?|hours?)")
                .expect("frequency pattern is valid"),
        }
    }

    /// Normalize a symptom label for matching
    ///
    /// Lower-cases, removes every parenthetical qualifier together with the
    /// whitespace hugging it, then trims.
    ///
    /// # Examples
    ///
    /// ```
    /// let extractor = remedyscriber::TextExtractor::new();
    /// assert_eq!(extractor.normalize_symptom("Fever (High) "), "fever");
    /// ```
    pub fn normalize_symptom(&self, symptom: &str) -> String {
        let lower = symptom.to_lowercase();
        self.parenthetical_pattern
            .replace_all(&lower, "")
            .trim()
            .to_string()
    }

    /// First matching "every N hrs" phrase, verbatim, or [`DEFAULT_FREQUENCY`].
    pub fn frequency(&self, dosage: &str) -> String {
        self.frequency_pattern
            .find(dosage)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| DEFAULT_FREQUENCY.to_string())
    }
}

/// Display name of a medicine field: the first ingredient of a combination.
///
/// ```
/// assert_eq!(remedyscriber::extract::medicine_name(" Paracetamol + Caffeine"), "Paracetamol");
/// assert_eq!(remedyscriber::extract::medicine_name("ORS ± Zinc"), "ORS");
/// ```
pub fn medicine_name(medicine: &str) -> String {
    medicine
        .split(|c| c == '+' || c == '±')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

/// Short drug-class description for a medicine field
///
/// Keywords are matched case-insensitively against the whole field, so a
/// combination is described by whichever ingredient class comes first in
/// the priority list.
pub fn describe(medicine: &str) -> &'static str {
    let medicine = medicine.to_lowercase();
    DESCRIPTIONS
        .iter()
        .find(|(keywords, _)| contains_any(&medicine, keywords))
        .map(|(_, description)| *description)
        .unwrap_or(FALLBACK_DESCRIPTION)
}

/// Safety warnings for one medicine and patient
///
/// Drug-class rules run first and accumulate (a combination product can
/// collect warnings from several classes), then patient-specific rules.
pub fn warnings(medicine: &str, dosage: &str, patient: &PatientInfo) -> Vec<String> {
    let medicine = medicine.to_lowercase();
    let dosage = dosage.to_lowercase();

    let mut warnings: Vec<String> = CLASS_WARNINGS
        .iter()
        .filter(|(keywords, _)| contains_any(&medicine, keywords))
        .flat_map(|(_, texts)| texts.iter().map(|text| text.to_string()))
        .collect();

    if patient.is_pregnant {
        warnings.push(PREGNANCY_WARNING.to_string());
    }
    if patient.is_nursing {
        warnings.push(NURSING_WARNING.to_string());
    }
    if patient.age < 1 {
        warnings.push(INFANT_WARNING.to_string());
    }
    if contains_any(&dosage, &PROFESSIONAL_DOSING_TERMS) {
        warnings.push(PROFESSIONAL_DOSING_WARNING.to_string());
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adult() -> PatientInfo {
        PatientInfo {
            symptoms: vec!["Fever".into()],
            age: 30,
            gender: "male".into(),
            duration: "1 day".into(),
            ..Default::default()
        }
    }

    #[test]
    fn normalize_strips_qualifiers() {
        let extractor = TextExtractor::new();
        assert_eq!(extractor.normalize_symptom("Fever (high)"), "fever");
        assert_eq!(extractor.normalize_symptom("  Runny Nose "), "runny nose");
        assert_eq!(extractor.normalize_symptom("Cough (dry) (night)"), "cough");
        // Whitespace on both sides of the qualifier goes with it
        assert_eq!(extractor.normalize_symptom("Pain (mild) Joint"), "painjoint");
    }

    #[test]
    fn frequency_is_found_case_insensitively() {
        let extractor = TextExtractor::new();
        assert_eq!(extractor.frequency("120mg every 6 hrs"), "every 6 hrs");
        assert_eq!(extractor.frequency("5 ml Every 4-6 Hours as needed"), "Every 4-6 Hours");
        assert_eq!(extractor.frequency("every 8 hr"), "every 8 hr");
        assert_eq!(extractor.frequency("twice daily"), DEFAULT_FREQUENCY);
        assert_eq!(extractor.frequency("every day"), DEFAULT_FREQUENCY);
    }

    #[test]
    fn medicine_name_takes_first_component() {
        assert_eq!(medicine_name("Paracetamol+Caffeine"), "Paracetamol");
        assert_eq!(medicine_name("Saline drops"), "Saline drops");
        assert_eq!(medicine_name("+Zinc"), "");
    }

    #[test]
    fn describe_uses_priority_order() {
        assert_eq!(
            describe("Ibuprofen + Paracetamol"),
            "Pain reliever and fever reducer (analgesic and antipyretic)"
        );
        assert_eq!(describe("CETIRIZINE syrup"), "Antihistamine for allergy symptoms");
        assert_eq!(
            describe("Hydrocortisone 1% cream"),
            "Anti-inflammatory steroid to reduce swelling and redness"
        );
        assert_eq!(describe("Honey"), FALLBACK_DESCRIPTION);
    }

    #[test]
    fn class_warnings_accumulate() {
        let warnings = warnings("Paracetamol + Ibuprofen", "10 ml", &adult());
        assert_eq!(
            warnings,
            vec![
                "Do not exceed 4000mg per day",
                "Avoid if you have liver disease",
                "Take with food to avoid stomach upset",
                "Avoid if you have stomach ulcers or kidney disease",
            ]
        );
    }

    #[test]
    fn patient_rules_follow_class_rules() {
        let patient = PatientInfo {
            age: 0,
            is_pregnant: true,
            is_nursing: true,
            ..adult()
        };
        let warnings = warnings("Cetirizine", "consult Pediatrician for dose", &patient);
        assert_eq!(
            warnings,
            vec![
                "May cause drowsiness - avoid driving",
                "Avoid alcohol while taking this medication",
                PREGNANCY_WARNING,
                NURSING_WARNING,
                INFANT_WARNING,
                PROFESSIONAL_DOSING_WARNING,
            ]
        );
    }

    #[test]
    fn no_warnings_for_plain_remedy() {
        assert!(warnings("Honey", "1 tsp", &adult()).is_empty());
    }
}
