//! Medication name comparison.
//!
//! Add, update and remove all resolve names through these two functions so
//! that the three paths agree on what counts as the same medication.

/// Canonical form of a medication name: Unicode lowercase.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
}

/// Whether two names are equal under [`normalize_name`].
pub fn names_match(a: &str, b: &str) -> bool {
    a == b || normalize_name(a) == normalize_name(b)
}
