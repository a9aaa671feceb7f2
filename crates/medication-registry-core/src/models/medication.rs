//! Medication models.

use serde::{Deserialize, Serialize};

use crate::registry::names_match;

/// A medication prescribed to exactly one patient.
///
/// A medication has no identity of its own: within its owning patient it is
/// addressed by name, compared case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Medication {
    name: String,
    dosage_mg: f64,
    frequency_per_day: u32,
}

impl Medication {
    /// Create a medication. Values are taken as given; only the ledger's
    /// admission rule decides whether it is stored.
    pub fn new(name: impl Into<String>, dosage_mg: f64, frequency_per_day: u32) -> Self {
        Self {
            name: name.into(),
            dosage_mg,
            frequency_per_day,
        }
    }

    /// Name as originally entered.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Amount per administration, in mg.
    pub fn dosage_mg(&self) -> f64 {
        self.dosage_mg
    }

    /// Administrations per day.
    pub fn frequency_per_day(&self) -> u32 {
        self.frequency_per_day
    }

    /// Dosage multiplied by frequency.
    pub fn daily_dosage_mg(&self) -> f64 {
        self.dosage_mg * f64::from(self.frequency_per_day)
    }

    /// Case-insensitive name comparison.
    pub fn matches_name(&self, name: &str) -> bool {
        names_match(&self.name, name)
    }

    pub(crate) fn set_dosage_mg(&mut self, dosage_mg: f64) {
        self.dosage_mg = dosage_mg;
    }
}
