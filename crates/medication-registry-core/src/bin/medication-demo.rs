//! Walks a registry through a fixed sequence of calls and prints the result.
//!
//! Set `MEDICATION_REGISTRY_POLICY` to a JSON policy file to change the
//! admission rule or dosage aggregation.

use anyhow::Context;
use chrono::NaiveDate;
use medication_registry_core::{PatientRegistry, RegistryPolicy};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const POLICY_ENV: &str = "MEDICATION_REGISTRY_POLICY";

fn date(year: i32, month: u32, day: u32) -> anyhow::Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .with_context(|| format!("invalid date {year}-{month}-{day}"))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "medication_registry_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let policy = match std::env::var_os(POLICY_ENV) {
        Some(path) => RegistryPolicy::from_path(&path)
            .with_context(|| format!("loading policy from {}", path.to_string_lossy()))?,
        None => RegistryPolicy::default(),
    };
    tracing::info!(?policy, "starting demo");

    let mut registry = PatientRegistry::with_policy(policy);

    registry.add_patient("P001", "John Doe", date(1980, 5, 15)?)?;
    registry.add_patient("P002", "Jane Smith", date(1975, 8, 22)?)?;

    registry.add_medication("P001", "MedicationA", 10.5, 2)?;
    // Once daily: dropped unless the policy admits it
    registry.add_medication("P001", "MedicationB", 5.0, 1)?;

    registry.add_medication("P002", "MedicationC", 7.5, 3)?;
    registry.add_medication("P002", "MedicationD", 12.0, 2)?;

    registry.update_dosage("P001", "MedicationA", 15.0)?;
    registry.remove_medication("P002", "MedicationC")?;

    for id in ["P001", "P002"] {
        let patient = registry.get_patient_summary(id)?;
        println!(
            "Patient: {}, Age: {}, Medication Count: {}",
            patient.name(),
            patient.age(),
            patient.medication_count()
        );
    }

    for id in ["P001", "P002"] {
        let total = registry.calculate_total_daily_dosage(id)?;
        println!("Total Daily Dosage for {}: {}", id, total);
    }

    Ok(())
}
