//! Patient registry and per-patient medication ledgers.

mod ledger;
mod names;
mod policy;

pub use ledger::*;
pub use names::*;
pub use policy::*;

use std::collections::HashMap;

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{Medication, Patient, PatientSummary};

/// Registry errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Patient with ID {0} already exists")]
    DuplicateId(String),

    #[error("Patient not found: {0}")]
    PatientNotFound(String),

    #[error("Medication {name} not found for patient {patient_id}")]
    MedicationNotFound { patient_id: String, name: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl RegistryError {
    /// True for both the patient and medication lookup failures.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RegistryError::PatientNotFound(_) | RegistryError::MedicationNotFound { .. }
        )
    }
}

pub type RegistryResult<T> = Result<T, RegistryError>;

/// In-memory collection of patients keyed by identifier.
///
/// Every operation runs to completion against `&mut self`; callers sharing a
/// registry across threads must hold one lock around each call (see
/// [`crate::MedicationRegistryCore`]).
#[derive(Debug, Default)]
pub struct PatientRegistry {
    patients: HashMap<String, Patient>,
    policy: RegistryPolicy,
}

impl PatientRegistry {
    /// Create an empty registry with the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with the given policy.
    pub fn with_policy(policy: RegistryPolicy) -> Self {
        Self {
            patients: HashMap::new(),
            policy,
        }
    }

    pub fn policy(&self) -> RegistryPolicy {
        self.policy
    }

    // =========================================================================
    // Patient Operations
    // =========================================================================

    /// Register a patient with an empty medication list.
    pub fn add_patient(
        &mut self,
        id: &str,
        name: &str,
        date_of_birth: NaiveDate,
    ) -> RegistryResult<()> {
        if id.is_empty() {
            return Err(RegistryError::InvalidInput("patient id is empty".into()));
        }
        if self.patients.contains_key(id) {
            return Err(RegistryError::DuplicateId(id.to_string()));
        }

        self.patients
            .insert(id.to_string(), Patient::new(id, name, date_of_birth));
        tracing::info!(patient_id = id, "registered patient");
        Ok(())
    }

    /// Borrow a patient, including its live medication list.
    pub fn get_patient_summary(&self, id: &str) -> RegistryResult<&Patient> {
        self.patients
            .get(id)
            .ok_or_else(|| RegistryError::PatientNotFound(id.to_string()))
    }

    /// Owned snapshot of a patient with age computed against `as_of`.
    pub fn summary_as_of(&self, id: &str, as_of: NaiveDate) -> RegistryResult<PatientSummary> {
        let patient = self.get_patient_summary(id)?;
        Ok(PatientSummary::capture(patient, as_of))
    }

    /// Change a patient's display name.
    pub fn rename_patient(&mut self, id: &str, name: &str) -> RegistryResult<()> {
        let patient = self.patient_mut(id)?;
        patient.set_name(name.to_string());
        tracing::debug!(patient_id = id, "renamed patient");
        Ok(())
    }

    /// Patient ids in ascending order.
    pub fn list_patients(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.patients.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn patient_count(&self) -> usize {
        self.patients.len()
    }

    pub fn contains_patient(&self, id: &str) -> bool {
        self.patients.contains_key(id)
    }

    // =========================================================================
    // Medication Operations
    // =========================================================================

    /// Offer a medication to a patient's ledger.
    ///
    /// A rejected frequency or a repeated name is not an error: the call
    /// succeeds and the returned [`Admission`] says nothing was stored.
    pub fn add_medication(
        &mut self,
        patient_id: &str,
        name: &str,
        dosage_mg: f64,
        frequency_per_day: u32,
    ) -> RegistryResult<Admission> {
        let rule = self.policy.admission;
        let patient = self.patient_mut(patient_id)?;
        let outcome = patient
            .ledger_mut()
            .add(Medication::new(name, dosage_mg, frequency_per_day), rule);

        match outcome {
            Admission::Admitted => {
                tracing::debug!(patient_id, medication = name, "added medication")
            }
            Admission::BelowAdmissionThreshold => tracing::debug!(
                patient_id,
                medication = name,
                frequency_per_day,
                min_frequency_per_day = rule.min_frequency_per_day(),
                "ignored medication below admission threshold"
            ),
            Admission::DuplicateName => tracing::debug!(
                patient_id,
                medication = name,
                "ignored medication with duplicate name"
            ),
        }

        Ok(outcome)
    }

    /// Replace the dosage of a named medication. Name and frequency are kept.
    pub fn update_dosage(
        &mut self,
        patient_id: &str,
        name: &str,
        new_dosage_mg: f64,
    ) -> RegistryResult<()> {
        let patient = self.patient_mut(patient_id)?;
        if !patient.ledger_mut().update_dosage(name, new_dosage_mg) {
            return Err(RegistryError::MedicationNotFound {
                patient_id: patient_id.to_string(),
                name: name.to_string(),
            });
        }

        tracing::debug!(patient_id, medication = name, new_dosage_mg, "updated dosage");
        Ok(())
    }

    /// Remove every medication with a matching name. Zero matches is fine.
    pub fn remove_medication(&mut self, patient_id: &str, name: &str) -> RegistryResult<usize> {
        let patient = self.patient_mut(patient_id)?;
        let removed = patient.ledger_mut().remove(name);

        tracing::debug!(patient_id, medication = name, removed, "removed medication");
        Ok(removed)
    }

    /// Sum of dosage times frequency over the patient's medications.
    pub fn calculate_total_daily_dosage(&self, patient_id: &str) -> RegistryResult<f64> {
        let patient = self.get_patient_summary(patient_id)?;
        Ok(patient.ledger().total_daily_dosage(self.policy.aggregation))
    }

    fn patient_mut(&mut self, id: &str) -> RegistryResult<&mut Patient> {
        self.patients
            .get_mut(id)
            .ok_or_else(|| RegistryError::PatientNotFound(id.to_string()))
    }
}
