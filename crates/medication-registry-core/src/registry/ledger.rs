//! Per-patient medication list.

use serde::Serialize;

use super::{AdmissionRule, DosageAggregation};
use crate::models::Medication;

/// Result of offering a medication to a ledger.
///
/// Only `Admitted` changes the ledger. The other two are silent no-ops, not
/// errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Appended to the end of the list
    Admitted,
    /// Frequency below the admission rule's minimum
    BelowAdmissionThreshold,
    /// A medication with the same name (any case) already exists
    DuplicateName,
}

impl Admission {
    pub fn is_admitted(self) -> bool {
        matches!(self, Admission::Admitted)
    }
}

/// Ordered medication list for one patient.
///
/// Invariant: no two entries have names equal under case-insensitive
/// comparison.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct MedicationLedger {
    entries: Vec<Medication>,
}

impl MedicationLedger {
    /// Entries in insertion order.
    pub fn entries(&self) -> &[Medication] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find a medication by case-insensitive name.
    pub fn find(&self, name: &str) -> Option<&Medication> {
        self.entries.iter().find(|m| m.matches_name(name))
    }

    /// Append `medication` unless the admission rule rejects its frequency
    /// or its name is already present. The first writer of a name wins.
    pub fn add(&mut self, medication: Medication, rule: AdmissionRule) -> Admission {
        if !rule.admits(medication.frequency_per_day()) {
            return Admission::BelowAdmissionThreshold;
        }

        if self.find(medication.name()).is_some() {
            return Admission::DuplicateName;
        }

        self.entries.push(medication);
        Admission::Admitted
    }

    /// Set the dosage of the first medication matching `name`. Returns
    /// `false` if none matches.
    pub fn update_dosage(&mut self, name: &str, dosage_mg: f64) -> bool {
        match self.entries.iter_mut().find(|m| m.matches_name(name)) {
            Some(medication) => {
                medication.set_dosage_mg(dosage_mg);
                true
            }
            None => false,
        }
    }

    /// Remove every medication matching `name`, returning how many went.
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|m| !m.matches_name(name));
        before - self.entries.len()
    }

    /// Total daily dosage in mg under the given aggregation.
    pub fn total_daily_dosage(&self, aggregation: DosageAggregation) -> f64 {
        aggregation.total(&self.entries)
    }

    /// Bypass the admission rule and name check.
    #[cfg(test)]
    pub(crate) fn push_unchecked(&mut self, medication: Medication) {
        self.entries.push(medication);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEGACY: AdmissionRule = AdmissionRule::RejectOnceDailyOrLess;

    #[test]
    fn test_add_preserves_order() {
        let mut ledger = MedicationLedger::default();
        assert_eq!(ledger.add(Medication::new("B", 1.0, 2), LEGACY), Admission::Admitted);
        assert_eq!(ledger.add(Medication::new("A", 1.0, 2), LEGACY), Admission::Admitted);

        let names: Vec<_> = ledger.entries().iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_add_below_threshold() {
        let mut ledger = MedicationLedger::default();
        let outcome = ledger.add(Medication::new("MedicationB", 5.0, 1), LEGACY);

        assert_eq!(outcome, Admission::BelowAdmissionThreshold);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_add_once_daily_with_corrected_rule() {
        let mut ledger = MedicationLedger::default();
        let outcome = ledger.add(
            Medication::new("MedicationB", 5.0, 1),
            AdmissionRule::RejectNonPositive,
        );

        assert!(outcome.is_admitted());
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_duplicate_name_first_writer_wins() {
        let mut ledger = MedicationLedger::default();
        ledger.add(Medication::new("Warfarin", 5.0, 2), LEGACY);
        let outcome = ledger.add(Medication::new("WARFARIN", 99.0, 4), LEGACY);

        assert_eq!(outcome, Admission::DuplicateName);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.entries()[0].name(), "Warfarin");
        assert_eq!(ledger.entries()[0].dosage_mg(), 5.0);
    }

    #[test]
    fn test_threshold_checked_before_duplicate() {
        let mut ledger = MedicationLedger::default();
        ledger.add(Medication::new("Warfarin", 5.0, 2), LEGACY);

        let outcome = ledger.add(Medication::new("warfarin", 5.0, 1), LEGACY);
        assert_eq!(outcome, Admission::BelowAdmissionThreshold);
    }

    #[test]
    fn test_update_dosage() {
        let mut ledger = MedicationLedger::default();
        ledger.add(Medication::new("MedicationA", 10.5, 2), LEGACY);
        ledger.add(Medication::new("MedicationX", 3.0, 2), LEGACY);

        assert!(ledger.update_dosage("medicationa", 15.0));

        let med = ledger.find("MedicationA").unwrap();
        assert_eq!(med.dosage_mg(), 15.0);
        assert_eq!(med.frequency_per_day(), 2);
        assert_eq!(med.name(), "MedicationA");
        assert_eq!(ledger.find("MedicationX").unwrap().dosage_mg(), 3.0);
    }

    #[test]
    fn test_update_missing() {
        let mut ledger = MedicationLedger::default();
        assert!(!ledger.update_dosage("Nothing", 1.0));
    }

    #[test]
    fn test_remove_all_matches() {
        let mut ledger = MedicationLedger::default();
        ledger.push_unchecked(Medication::new("Dup", 1.0, 2));
        ledger.push_unchecked(Medication::new("Keep", 1.0, 2));
        ledger.push_unchecked(Medication::new("DUP", 2.0, 2));

        assert_eq!(ledger.remove("dup"), 2);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.entries()[0].name(), "Keep");
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut ledger = MedicationLedger::default();
        ledger.add(Medication::new("Keep", 1.0, 2), LEGACY);

        assert_eq!(ledger.remove("Other"), 0);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_total_daily_dosage() {
        let mut ledger = MedicationLedger::default();
        assert_eq!(ledger.total_daily_dosage(DosageAggregation::SinglePass), 0.0);

        ledger.add(Medication::new("MedicationA", 15.0, 2), LEGACY);
        assert_eq!(ledger.total_daily_dosage(DosageAggregation::SinglePass), 30.0);
        assert_eq!(ledger.total_daily_dosage(DosageAggregation::LegacyDoubleFirst), 60.0);
    }
}
