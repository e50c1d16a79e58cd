//! Patient models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Upper bound (exclusive) for generated medical record numbers.
pub const GENERATED_MRN_LIMIT: u128 = 100_000;

/// Administrative gender as captured at registration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

/// A registered patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Unique identifier, generated on registration
    pub id: String,
    /// Full name
    pub name: String,
    /// Date of birth
    pub date_of_birth: NaiveDate,
    /// Gender
    pub gender: Gender,
    /// Medical record number (assumed unique, not enforced)
    pub medical_record_number: String,
}

/// Fields for registering a patient; the identifier is assigned by the directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewPatient {
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub medical_record_number: String,
}

impl NewPatient {
    /// Placeholder registration used by the "add patient" action.
    ///
    /// The record number is drawn from a fresh v4 UUID so it is random in
    /// `0..GENERATED_MRN_LIMIT` without pulling in a separate RNG.
    pub fn placeholder() -> Self {
        let mrn = uuid::Uuid::new_v4().as_u128() % GENERATED_MRN_LIMIT;
        Self {
            name: "New Patient".into(),
            date_of_birth: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default(),
            gender: Gender::Other,
            medical_record_number: mrn.to_string(),
        }
    }
}

impl Patient {
    /// Create a patient from registration fields with a fresh identifier.
    pub fn new(fields: NewPatient) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: fields.name,
            date_of_birth: fields.date_of_birth,
            gender: fields.gender,
            medical_record_number: fields.medical_record_number,
        }
    }

    /// Search predicate: name matches case-insensitively, record number
    /// matches case-sensitively. `needle_lower` must already be lowercased.
    pub fn matches(&self, needle_lower: &str, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
            || self.medical_record_number.contains(needle)
    }
}
