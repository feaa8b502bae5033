//! # Remedyscriber - Symptom to Medicine Recommendations
//!
//! Matches a patient's symptoms, age and pregnancy/nursing status against the
//! reference table loaded by [`remedyscraper`] and returns up to five ranked
//! candidate medicines, each with a dosing frequency, a short drug-class
//! description and safety warnings.
//!
//! This is a lookup tool, not clinical decision support: confidence values
//! are heuristic ranks, not probabilities.
//!
//! ## Modules
//!
//! - [`engine`]: matching, scoring, dedup and ranking
//! - [`extract`]: name/frequency extraction, descriptions, warnings
//! - [`patient`]: request type, age buckets, symptom catalog
//! - [`formulary`]: loaded table plus last-query state
//! - [`export`]: CSV and JSON output
//!
//! ## Example
//!
//! ```
//! use remedyscriber::{parse_table, recommend, PatientInfo};
//!
//! let table = parse_table("symptom,age,medicine,dosage\nFever,1-3 years,Paracetamol+Caffeine,every 6 hrs 120mg");
//! let patient = PatientInfo {
//!     symptoms: vec!["Fever".into()],
//!     age: 2,
//!     gender: "female".into(),
//!     duration: "1 day".into(),
//!     ..Default::default()
//! };
//!
//! let ranked = recommend(&table, &patient);
//! assert_eq!(ranked[0].name, "Paracetamol");
//! assert_eq!(ranked[0].frequency, "every 6 hrs");
//! ```

pub mod engine;
pub mod export;
pub mod extract;
pub mod formulary;
pub mod patient;

pub use engine::{recommend, Recommendation, Recommender, MAX_RECOMMENDATIONS};
pub use export::{to_json, write_csv, ExportError};
pub use extract::TextExtractor;
pub use formulary::Formulary;
pub use patient::{search_symptoms, AgeGroup, IntakeError, PatientInfo, COMMON_SYMPTOMS};
pub use remedyscraper::{load, parse_table, MedicineRecord, TableSource};
