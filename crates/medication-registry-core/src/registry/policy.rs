//! Registry policy: the admission rule and the dosage aggregation mode.
//!
//! The legacy registry dropped once-daily medications and counted the first
//! medication twice when totalling. Both behaviours stay selectable here
//! so that fixing either is a single configuration change.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Medication;

/// Lowest frequency admitted under [`AdmissionRule::RejectOnceDailyOrLess`].
pub const LEGACY_MIN_FREQUENCY_PER_DAY: u32 = 2;

/// Lowest frequency admitted under [`AdmissionRule::RejectNonPositive`].
pub const MIN_FREQUENCY_PER_DAY: u32 = 1;

/// Policy loading errors.
#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("Failed to read policy file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid policy JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type PolicyResult<T> = Result<T, PolicyError>;

/// Which frequencies a medication must have to be stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionRule {
    /// Frequencies of 1 or less are dropped (observed behaviour).
    #[default]
    RejectOnceDailyOrLess,
    /// Only a frequency of 0 is dropped.
    RejectNonPositive,
}

impl AdmissionRule {
    /// Minimum admitted frequency per day.
    pub fn min_frequency_per_day(self) -> u32 {
        match self {
            AdmissionRule::RejectOnceDailyOrLess => LEGACY_MIN_FREQUENCY_PER_DAY,
            AdmissionRule::RejectNonPositive => MIN_FREQUENCY_PER_DAY,
        }
    }

    pub fn admits(self, frequency_per_day: u32) -> bool {
        frequency_per_day >= self.min_frequency_per_day()
    }
}

/// How the daily dosage total is accumulated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DosageAggregation {
    /// Zero-seeded sum over every medication.
    #[default]
    SinglePass,
    /// Seeded with the first medication's contribution, then summed over the
    /// whole list, so the first medication is counted twice (observed
    /// behaviour).
    LegacyDoubleFirst,
}

impl DosageAggregation {
    /// Total daily dosage in mg. An empty list is always 0.
    pub fn total(self, medications: &[Medication]) -> f64 {
        let seed = match (self, medications.first()) {
            (DosageAggregation::LegacyDoubleFirst, Some(first)) => first.daily_dosage_mg(),
            _ => 0.0,
        };

        medications
            .iter()
            .fold(seed, |total, med| total + med.daily_dosage_mg())
    }
}

/// Registry-wide behaviour switches.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct RegistryPolicy {
    pub admission: AdmissionRule,
    pub aggregation: DosageAggregation,
}

impl RegistryPolicy {
    /// Legacy behaviour, both defects included.
    pub fn observed() -> Self {
        Self {
            admission: AdmissionRule::RejectOnceDailyOrLess,
            aggregation: DosageAggregation::LegacyDoubleFirst,
        }
    }

    /// Admits once-daily medications and sums each medication once.
    pub fn corrected() -> Self {
        Self {
            admission: AdmissionRule::RejectNonPositive,
            aggregation: DosageAggregation::SinglePass,
        }
    }

    /// Parse a policy from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> PolicyResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a policy from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> PolicyResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
