//! Process-lifetime holder for the reference table and the latest query.

use remedyscraper::{MedicineRecord, TableSource};

use crate::engine::{Recommendation, Recommender};
use crate::patient::PatientInfo;

/// The loaded reference table plus the most recent request and its results
///
/// The table is loaded once and never changes afterwards. Each call to
/// [`Formulary::recommend`] replaces the remembered patient and results.
#[derive(Debug, Clone, Default)]
pub struct Formulary {
    records: Vec<MedicineRecord>,
    recommender: Recommender,
    patient: Option<PatientInfo>,
    recommendations: Vec<Recommendation>,
}

impl Formulary {
    /// Load the table from `source`; an unreachable source gives an empty formulary.
    pub fn load(source: &TableSource) -> Self {
        Self::from_records(remedyscraper::load(source))
    }

    pub fn from_records(records: Vec<MedicineRecord>) -> Self {
        if records.is_empty() {
            tracing::warn!("Medicine table is empty; every query will return no recommendations");
        }
        Formulary {
            records,
            ..Default::default()
        }
    }

    pub fn records(&self) -> &[MedicineRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Run a query and remember it
    pub fn recommend(&mut self, patient: PatientInfo) -> &[Recommendation] {
        self.recommendations = self.recommender.recommend(&self.records, &patient);
        self.patient = Some(patient);
        &self.recommendations
    }

    /// Results of the last query, empty if none or after [`Formulary::clear`].
    pub fn recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }

    pub fn patient(&self) -> Option<&PatientInfo> {
        self.patient.as_ref()
    }

    /// Forget the last query. The table stays loaded.
    pub fn clear(&mut self) {
        self.recommendations.clear();
        self.patient = None;
    }
}
