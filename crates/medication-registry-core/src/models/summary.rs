//! Owned patient summaries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Medication, Patient};

/// Point-in-time view of a patient.
///
/// Unlike a borrowed [`Patient`], a summary does not follow later mutations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientSummary {
    pub id: String,
    pub name: String,
    pub date_of_birth: NaiveDate,
    /// Age computed against `as_of`
    pub age: i32,
    /// Date the age was computed against
    pub as_of: NaiveDate,
    pub medication_count: usize,
    /// Medications in insertion order
    pub medications: Vec<Medication>,
}

impl PatientSummary {
    /// Snapshot a patient, computing age against `as_of`.
    pub fn capture(patient: &Patient, as_of: NaiveDate) -> Self {
        Self {
            id: patient.id().to_string(),
            name: patient.name().to_string(),
            date_of_birth: patient.date_of_birth(),
            age: patient.age_on(as_of),
            as_of,
            medication_count: patient.medication_count(),
            medications: patient.medications().to_vec(),
        }
    }

    /// Find a medication by case-insensitive name.
    pub fn medication(&self, name: &str) -> Option<&Medication> {
        self.medications.iter().find(|m| m.matches_name(name))
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
