//! Domain models for the medication registry.

mod medication;
mod patient;
mod summary;

pub use medication::*;
pub use patient::*;
pub use summary::*;
