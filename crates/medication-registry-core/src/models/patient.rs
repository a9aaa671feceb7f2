//! Patient models.

use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;

use super::Medication;
use crate::registry::MedicationLedger;

/// A registered patient and the medications prescribed to them.
///
/// `id` and `date_of_birth` are fixed at registration; only the name and the
/// medication ledger change afterwards.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Patient {
    id: String,
    name: String,
    date_of_birth: NaiveDate,
    medications: MedicationLedger,
}

impl Patient {
    /// Create a patient with an empty medication list.
    pub fn new(id: impl Into<String>, name: impl Into<String>, date_of_birth: NaiveDate) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            date_of_birth,
            medications: MedicationLedger::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date_of_birth(&self) -> NaiveDate {
        self.date_of_birth
    }

    /// Age in whole years as of `as_of`.
    ///
    /// This is the plain difference of calendar years. It does not check
    /// whether the birthday has passed yet, so it reads one year high until
    /// it has.
    pub fn age_on(&self, as_of: NaiveDate) -> i32 {
        as_of.year() - self.date_of_birth.year()
    }

    /// Age as of today's local date. See [`Patient::age_on`].
    pub fn age(&self) -> i32 {
        self.age_on(Local::now().date_naive())
    }

    /// Medications in insertion order.
    pub fn medications(&self) -> &[Medication] {
        self.medications.entries()
    }

    pub fn medication_count(&self) -> usize {
        self.medications.len()
    }

    /// The patient's medication ledger.
    pub fn ledger(&self) -> &MedicationLedger {
        &self.medications
    }

    pub(crate) fn ledger_mut(&mut self) -> &mut MedicationLedger {
        &mut self.medications
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_patient() {
        let patient = Patient::new("P001", "John Doe", date(1980, 5, 15));
        assert_eq!(patient.id(), "P001");
        assert_eq!(patient.name(), "John Doe");
        assert_eq!(patient.date_of_birth(), date(1980, 5, 15));
        assert_eq!(patient.medication_count(), 0);
        assert!(patient.medications().is_empty());
    }

    #[test]
    fn test_age_after_birthday() {
        let patient = Patient::new("P001", "John Doe", date(1980, 5, 15));
        assert_eq!(patient.age_on(date(2024, 6, 1)), 44);
    }

    #[test]
    fn test_age_overstates_before_birthday() {
        // Year difference only: 2024-01-01 is before the birthday but still reads 44
        let patient = Patient::new("P001", "John Doe", date(1980, 5, 15));
        assert_eq!(patient.age_on(date(2024, 1, 1)), 44);
    }

    #[test]
    fn test_age_uses_local_date() {
        let patient = Patient::new("P001", "John Doe", date(1980, 5, 15));
        let expected = Local::now().date_naive().year() - 1980;
        assert_eq!(patient.age(), expected);
    }
}
