//! Tests for the thread-safe FFI object.

use std::sync::Arc;
use std::thread;

use medication_registry_core::{
    new_registry, new_registry_with_policy, FfiAdmission, MedicationRegistryError,
};

#[test]
fn test_patient_lifecycle() {
    let core = new_registry();
    core.add_patient("P001".into(), "John Doe".into(), "1980-05-15".into())
        .unwrap();

    let admitted = core
        .add_medication("P001".into(), "MedicationA".into(), 10.5, 2)
        .unwrap();
    assert_eq!(admitted, FfiAdmission::Admitted);

    let rejected = core
        .add_medication("P001".into(), "MedicationB".into(), 5.0, 1)
        .unwrap();
    assert_eq!(rejected, FfiAdmission::BelowAdmissionThreshold);

    core.update_dosage("P001".into(), "medicationa".into(), 15.0)
        .unwrap();

    let summary = core
        .get_patient_summary("P001".into(), Some("2025-12-31".into()))
        .unwrap();
    assert_eq!(summary.name, "John Doe");
    assert_eq!(summary.date_of_birth, "1980-05-15");
    assert_eq!(summary.age, 45);
    assert_eq!(summary.medication_count, 1);
    assert_eq!(summary.medications[0].dosage_mg, 15.0);

    assert_eq!(
        core.calculate_total_daily_dosage("P001".into()).unwrap(),
        30.0
    );
}

#[test]
fn test_errors_map_to_ffi() {
    let core = new_registry();
    core.add_patient("P001".into(), "John Doe".into(), "1980-05-15".into())
        .unwrap();

    assert!(matches!(
        core.add_patient("P001".into(), "Again".into(), "1980-05-15".into()),
        Err(MedicationRegistryError::DuplicateId(id)) if id == "P001"
    ));
    assert!(matches!(
        core.calculate_total_daily_dosage("P404".into()),
        Err(MedicationRegistryError::NotFound(_))
    ));
    assert!(matches!(
        core.update_dosage("P001".into(), "Ghost".into(), 1.0),
        Err(MedicationRegistryError::NotFound(_))
    ));
    assert!(matches!(
        core.add_patient("P002".into(), "Bad Date".into(), "15/05/1980".into()),
        Err(MedicationRegistryError::InvalidInput(_))
    ));
    assert!(matches!(
        core.add_patient("".into(), "No Id".into(), "1980-05-15".into()),
        Err(MedicationRegistryError::InvalidInput(_))
    ));
}

#[test]
fn test_registry_with_policy() {
    let core = new_registry_with_policy(r#"{"aggregation": "legacy_double_first"}"#.into())
        .unwrap();
    core.add_patient("P001".into(), "John Doe".into(), "1980-05-15".into())
        .unwrap();
    core.add_medication("P001".into(), "MedicationA".into(), 15.0, 2)
        .unwrap();

    assert_eq!(
        core.calculate_total_daily_dosage("P001".into()).unwrap(),
        60.0
    );

    assert!(matches!(
        new_registry_with_policy("not json".into()),
        Err(MedicationRegistryError::InvalidInput(_))
    ));
}

#[test]
fn test_remove_rename_list() {
    let core = new_registry();
    core.add_patient("P002".into(), "Jane Smith".into(), "1975-08-22".into())
        .unwrap();
    core.add_patient("P001".into(), "John Doe".into(), "1980-05-15".into())
        .unwrap();
    core.add_medication("P002".into(), "MedicationC".into(), 7.5, 3)
        .unwrap();

    assert_eq!(
        core.remove_medication("P002".into(), "MEDICATIONC".into())
            .unwrap(),
        1
    );
    assert_eq!(
        core.remove_medication("P002".into(), "MedicationC".into())
            .unwrap(),
        0
    );

    core.rename_patient("P002".into(), "Jane Doe".into()).unwrap();
    assert_eq!(core.list_patients().unwrap(), vec!["P001", "P002"]);

    let json = core.summary_json("P002".into()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["name"], "Jane Doe");
    assert_eq!(value["medication_count"], 0);
}

#[test]
fn test_concurrent_adds_keep_names_unique() {
    let core = new_registry();
    core.add_patient("P001".into(), "John Doe".into(), "1980-05-15".into())
        .unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let core = Arc::clone(&core);
            thread::spawn(move || {
                let name = if i % 2 == 0 { "Shared" } else { "SHARED" };
                core.add_medication("P001".into(), name.into(), i as f64, 2)
                    .unwrap()
            })
        })
        .collect();

    let admitted = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|outcome| *outcome == FfiAdmission::Admitted)
        .count();

    assert_eq!(admitted, 1);
    let summary = core.get_patient_summary("P001".into(), None).unwrap();
    assert_eq!(summary.medication_count, 1);
}
