//! Domain models for patient records.

mod patient;
mod visit;

pub use patient::*;
pub use visit::*;
