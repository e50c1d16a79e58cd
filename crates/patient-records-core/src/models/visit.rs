//! Visit models: clinical encounters owned by a patient.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Optional measurements taken during a visit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Vitals {
    /// Body temperature in °C
    pub temperature: Option<f64>,
    /// Heart rate in bpm
    pub heart_rate: Option<f64>,
    /// Blood pressure as written, e.g. "120/80"
    pub blood_pressure: Option<String>,
}

impl Vitals {
    pub fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.heart_rate.is_none() && self.blood_pressure.is_none()
    }
}

/// A clinical encounter record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Visit {
    /// Unique visit ID
    pub id: String,
    /// Owning patient ID
    pub patient_id: String,
    /// Visit date
    pub date: NaiveDate,
    /// Presenting complaint
    pub chief_complaint: String,
    /// Diagnosis
    pub diagnosis: String,
    /// Free-text clinical notes
    pub notes: String,
    /// Medications, in the order they were entered (duplicates allowed)
    pub medications: Vec<String>,
    /// Vitals
    pub vitals: Vitals,
}

impl Visit {
    /// Create an empty visit for a patient on the given date.
    pub fn new(patient_id: String, date: NaiveDate) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            patient_id,
            date,
            chief_complaint: String::new(),
            diagnosis: String::new(),
            notes: String::new(),
            medications: Vec::new(),
            vitals: Vitals::default(),
        }
    }

    /// Apply a partial update, replacing only the fields that are set.
    pub fn apply(&mut self, update: VisitUpdate) {
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(chief_complaint) = update.chief_complaint {
            self.chief_complaint = chief_complaint;
        }
        if let Some(diagnosis) = update.diagnosis {
            self.diagnosis = diagnosis;
        }
        if let Some(notes) = update.notes {
            self.notes = notes;
        }
        if let Some(medications) = update.medications {
            self.medications = medications;
        }
        if let Some(vitals) = update.vitals {
            self.vitals = vitals;
        }
    }

    /// Whether none of the required clinical fields has been filled in yet.
    pub fn is_blank(&self) -> bool {
        self.chief_complaint.is_empty()
            && self.diagnosis.is_empty()
            && self.notes.is_empty()
            && self.medications.is_empty()
    }
}

/// Named fields to replace on a visit. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VisitUpdate {
    pub date: Option<NaiveDate>,
    pub chief_complaint: Option<String>,
    pub diagnosis: Option<String>,
    pub notes: Option<String>,
    pub medications: Option<Vec<String>>,
    pub vitals: Option<Vitals>,
}
