//! In-memory record store.
//!
//! Holds the patient directory and the visit ledger. Operations are split
//! across submodules the same way the collections are: [`patients`] for the
//! directory, [`visits`] for the ledger, [`seed`] for the mock data set.

mod patients;
mod seed;
mod visits;

pub use seed::*;

use crate::models::{Patient, Visit};

/// Owner of the patient and visit collections.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    patients: Vec<Patient>,
    visits: Vec<Visit>,
}

impl RecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-loaded with the mock patients and visits.
    pub fn seeded() -> Self {
        Self {
            patients: mock_patients(),
            visits: mock_visits(),
        }
    }

    /// Number of patients in the directory.
    pub fn patient_count(&self) -> usize {
        self.patients.len()
    }

    /// Number of visits in the ledger, across all patients.
    pub fn visit_count(&self) -> usize {
        self.visits.len()
    }

    /// Drop every patient and visit.
    pub fn clear(&mut self) {
        self.patients.clear();
        self.visits.clear();
    }
}
