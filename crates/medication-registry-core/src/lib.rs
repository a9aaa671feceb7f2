//! Medication Registry Core Library
//!
//! In-memory registry of patients and the medications prescribed to them.
//!
//! # Architecture
//!
//! ```text
//!   caller ──► MedicationRegistryCore (FFI, one Mutex)
//!                        │
//!                        ▼
//!                 PatientRegistry ── RegistryPolicy
//!                        │            (admission rule, dosage aggregation)
//!            ┌───────────┼───────────┐
//!            ▼           ▼           ▼
//!         Patient     Patient     Patient
//!            │
//!     MedicationLedger  (ordered, names unique ignoring case)
//! ```
//!
//! # Modules
//!
//! - [`models`]: Domain types (Patient, Medication, PatientSummary)
//! - [`registry`]: Patient registry, medication ledger and policy

pub mod models;
pub mod registry;

// Re-export commonly used types
pub use models::{Medication, Patient, PatientSummary};
pub use registry::{
    Admission, AdmissionRule, DosageAggregation, MedicationLedger, PatientRegistry,
    RegistryError, RegistryPolicy, RegistryResult,
};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use chrono::{Local, NaiveDate};

const DATE_FORMAT: &str = "%Y-%m-%d";

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum MedicationRegistryError {
    #[error("Duplicate ID: {0}")]
    DuplicateId(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Lock error: {0}")]
    LockError(String),
}

impl From<RegistryError> for MedicationRegistryError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::DuplicateId(id) => MedicationRegistryError::DuplicateId(id),
            RegistryError::InvalidInput(msg) => MedicationRegistryError::InvalidInput(msg),
            not_found => MedicationRegistryError::NotFound(not_found.to_string()),
        }
    }
}

impl From<registry::PolicyError> for MedicationRegistryError {
    fn from(e: registry::PolicyError) -> Self {
        MedicationRegistryError::InvalidInput(e.to_string())
    }
}

impl From<serde_json::Error> for MedicationRegistryError {
    fn from(e: serde_json::Error) -> Self {
        MedicationRegistryError::SerializationError(e.to_string())
    }
}

impl From<chrono::ParseError> for MedicationRegistryError {
    fn from(e: chrono::ParseError) -> Self {
        MedicationRegistryError::InvalidInput(format!("date must be YYYY-MM-DD: {}", e))
    }
}

impl<T> From<std::sync::PoisonError<T>> for MedicationRegistryError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        MedicationRegistryError::LockError(format!("Lock poisoned: {}", e))
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, MedicationRegistryError> {
    Ok(NaiveDate::parse_from_str(value, DATE_FORMAT)?)
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Create an empty registry with the default policy.
#[uniffi::export]
pub fn new_registry() -> Arc<MedicationRegistryCore> {
    Arc::new(MedicationRegistryCore::from_registry(PatientRegistry::new()))
}

/// Create an empty registry with a policy given as JSON.
#[uniffi::export]
pub fn new_registry_with_policy(
    policy_json: String,
) -> Result<Arc<MedicationRegistryCore>, MedicationRegistryError> {
    let policy = RegistryPolicy::from_json_str(&policy_json)?;
    Ok(Arc::new(MedicationRegistryCore::from_registry(
        PatientRegistry::with_policy(policy),
    )))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe registry wrapper for FFI.
///
/// Each call holds the lock for its whole duration, so the registry's
/// invariants hold across concurrent callers.
#[derive(uniffi::Object)]
pub struct MedicationRegistryCore {
    registry: Mutex<PatientRegistry>,
}

impl MedicationRegistryCore {
    pub fn from_registry(registry: PatientRegistry) -> Self {
        Self {
            registry: Mutex::new(registry),
        }
    }
}

#[uniffi::export]
impl MedicationRegistryCore {
    // =========================================================================
    // Patient Operations
    // =========================================================================

    /// Register a patient. `date_of_birth` is `YYYY-MM-DD`.
    pub fn add_patient(
        &self,
        id: String,
        name: String,
        date_of_birth: String,
    ) -> Result<(), MedicationRegistryError> {
        let date_of_birth = parse_date(&date_of_birth)?;
        let mut registry = self.registry.lock()?;
        registry.add_patient(&id, &name, date_of_birth)?;
        Ok(())
    }

    /// Snapshot a patient. Age is computed against `as_of` (`YYYY-MM-DD`),
    /// or today's local date when absent.
    pub fn get_patient_summary(
        &self,
        id: String,
        as_of: Option<String>,
    ) -> Result<FfiPatientSummary, MedicationRegistryError> {
        let as_of = match as_of {
            Some(date) => parse_date(&date)?,
            None => Local::now().date_naive(),
        };
        let registry = self.registry.lock()?;
        Ok(registry.summary_as_of(&id, as_of)?.into())
    }

    /// Snapshot a patient as pretty JSON, age computed against today.
    pub fn summary_json(&self, id: String) -> Result<String, MedicationRegistryError> {
        let registry = self.registry.lock()?;
        let summary = registry.summary_as_of(&id, Local::now().date_naive())?;
        Ok(summary.to_json()?)
    }

    /// Change a patient's display name.
    pub fn rename_patient(&self, id: String, name: String) -> Result<(), MedicationRegistryError> {
        let mut registry = self.registry.lock()?;
        registry.rename_patient(&id, &name)?;
        Ok(())
    }

    /// Patient ids in ascending order.
    pub fn list_patients(&self) -> Result<Vec<String>, MedicationRegistryError> {
        let registry = self.registry.lock()?;
        Ok(registry
            .list_patients()
            .into_iter()
            .map(String::from)
            .collect())
    }

    // =========================================================================
    // Medication Operations
    // =========================================================================

    /// Offer a medication to a patient. Rejections are reported in the
    /// returned value, not as errors.
    pub fn add_medication(
        &self,
        patient_id: String,
        name: String,
        dosage_mg: f64,
        frequency_per_day: u32,
    ) -> Result<FfiAdmission, MedicationRegistryError> {
        let mut registry = self.registry.lock()?;
        let outcome = registry.add_medication(&patient_id, &name, dosage_mg, frequency_per_day)?;
        Ok(outcome.into())
    }

    /// Replace the dosage of a named medication.
    pub fn update_dosage(
        &self,
        patient_id: String,
        name: String,
        new_dosage_mg: f64,
    ) -> Result<(), MedicationRegistryError> {
        let mut registry = self.registry.lock()?;
        registry.update_dosage(&patient_id, &name, new_dosage_mg)?;
        Ok(())
    }

    /// Remove every medication with a matching name; returns how many.
    pub fn remove_medication(
        &self,
        patient_id: String,
        name: String,
    ) -> Result<u32, MedicationRegistryError> {
        let mut registry = self.registry.lock()?;
        let removed = registry.remove_medication(&patient_id, &name)?;
        Ok(removed as u32)
    }

    /// Total daily dosage in mg.
    pub fn calculate_total_daily_dosage(
        &self,
        patient_id: String,
    ) -> Result<f64, MedicationRegistryError> {
        let registry = self.registry.lock()?;
        Ok(registry.calculate_total_daily_dosage(&patient_id)?)
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe admission outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiAdmission {
    Admitted,
    BelowAdmissionThreshold,
    DuplicateName,
}

impl From<Admission> for FfiAdmission {
    fn from(outcome: Admission) -> Self {
        match outcome {
            Admission::Admitted => FfiAdmission::Admitted,
            Admission::BelowAdmissionThreshold => FfiAdmission::BelowAdmissionThreshold,
            Admission::DuplicateName => FfiAdmission::DuplicateName,
        }
    }
}

/// FFI-safe medication.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMedication {
    pub name: String,
    pub dosage_mg: f64,
    pub frequency_per_day: u32,
}

impl From<Medication> for FfiMedication {
    fn from(medication: Medication) -> Self {
        Self {
            name: medication.name().to_string(),
            dosage_mg: medication.dosage_mg(),
            frequency_per_day: medication.frequency_per_day(),
        }
    }
}

/// FFI-safe patient summary.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatientSummary {
    pub id: String,
    pub name: String,
    /// `YYYY-MM-DD`
    pub date_of_birth: String,
    pub age: i32,
    pub medication_count: u32,
    pub medications: Vec<FfiMedication>,
}

impl From<PatientSummary> for FfiPatientSummary {
    fn from(summary: PatientSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            date_of_birth: summary.date_of_birth.format(DATE_FORMAT).to_string(),
            age: summary.age,
            medication_count: summary.medication_count as u32,
            medications: summary.medications.into_iter().map(|m| m.into()).collect(),
        }
    }
}
