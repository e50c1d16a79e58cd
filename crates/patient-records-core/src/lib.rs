//! Patient Records Core Library
//!
//! In-memory patient directory, visit ledger and visit-editing session for a
//! single-page records UI.
//!
//! # Architecture
//!
//! ```text
//!   Host UI (Swift / Kotlin / web shell)
//!        │ intents                  ▲ Screen snapshot
//!        ▼                          │
//!   ┌───────────────────────────────┴──────────┐
//!   │            RecordsController             │
//!   │  ┌──────────────┐   ┌─────────────────┐  │
//!   │  │ SessionState │   │   RecordStore   │  │
//!   │  │ Idle         │   │  patients (dir) │  │
//!   │  │ Patient      │   │  visits (ledger)│  │
//!   │  │ Visit(View)  │   └─────────────────┘  │
//!   │  │ Visit(Edit)  │            ▲           │
//!   │  └──────────────┘            │ save      │
//!   │                      VisitForm::validate │
//!   └──────────────────────────────────────────┘
//! ```
//!
//! # Core Principle
//!
//! **One owner.** The controller is the only thing that mutates records or
//! selection; views only ever see `&` borrows.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Patient, Visit, Vitals)
//! - [`store`]: In-memory patient directory and visit ledger
//! - [`validation`]: Visit form schema
//! - [`session`]: Selection / edit state machine
//! - [`controller`]: The single owner of all mutable state
//! - [`views`]: Serializable snapshots for rendering
//! - [`config`]: Startup configuration

pub mod config;
pub mod controller;
pub mod models;
pub mod session;
pub mod store;
pub mod validation;
pub mod views;

// Re-export commonly used types
pub use config::{ConfigError, RecordsConfig};
pub use controller::{ControllerError, ControllerResult, RecordsController};
pub use models::{Gender, NewPatient, Patient, Visit, VisitUpdate, Vitals};
pub use session::{SessionEvent, SessionState, TransitionError, VisitMode};
pub use store::RecordStore;
pub use validation::{FieldError, FormField, ValidatedVisit, ValidationErrors, VisitForm};
pub use views::Screen;

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
#[uniffi(flat_error)]
pub enum RecordsError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Lock poisoned: {0}")]
    Lock(String),
}

impl From<ControllerError> for RecordsError {
    fn from(e: ControllerError) -> Self {
        match &e {
            ControllerError::PatientNotFound(_) | ControllerError::VisitNotFound(_) => {
                RecordsError::NotFound(e.to_string())
            }
            ControllerError::NoVisitSelected | ControllerError::Transition(_) => {
                RecordsError::InvalidState(e.to_string())
            }
            ControllerError::Validation(errors) => RecordsError::Validation(errors.to_string()),
        }
    }
}

impl From<ConfigError> for RecordsError {
    fn from(e: ConfigError) -> Self {
        RecordsError::Config(e.to_string())
    }
}

impl From<serde_json::Error> for RecordsError {
    fn from(e: serde_json::Error) -> Self {
        RecordsError::Serialization(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for RecordsError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        RecordsError::Lock(e.to_string())
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open a session configured from the process environment.
#[uniffi::export]
pub fn open_records() -> Result<Arc<PatientRecords>, RecordsError> {
    let config = RecordsConfig::from_env()?;
    Ok(PatientRecords::with_config(config))
}

/// Open a session with explicit settings (for testing).
///
/// `today` pins the date stamped on new visits (`YYYY-MM-DD`).
#[uniffi::export]
pub fn open_records_with_config(
    seed_mock_data: bool,
    today: Option<String>,
) -> Result<Arc<PatientRecords>, RecordsError> {
    let today = today
        .map(|raw| parse_date(&raw))
        .transpose()?;
    Ok(PatientRecords::with_config(RecordsConfig {
        seed_mock_data,
        today,
    }))
}

/// Validate a visit form without touching any session.
#[uniffi::export]
pub fn validate_visit_form(form: FfiVisitForm) -> Vec<FfiFieldError> {
    match VisitForm::from(form).validate() {
        Ok(_) => Vec::new(),
        Err(errors) => errors.0.into_iter().map(Into::into).collect(),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, RecordsError> {
    NaiveDate::parse_from_str(raw.trim(), validation::DATE_FORMAT)
        .map_err(|e| RecordsError::InvalidInput(format!("{}: {}", raw, e)))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe controller wrapper for FFI.
#[derive(uniffi::Object)]
pub struct PatientRecords {
    controller: Mutex<RecordsController>,
}

impl PatientRecords {
    fn with_config(config: RecordsConfig) -> Arc<Self> {
        Arc::new(Self {
            controller: Mutex::new(RecordsController::new(config)),
        })
    }
}

#[uniffi::export]
impl PatientRecords {
    // =========================================================================
    // Patient Operations
    // =========================================================================

    /// Patients whose name or record number contains `term`.
    pub fn search_patients(&self, term: String) -> Result<Vec<FfiPatient>, RecordsError> {
        let controller = self.controller.lock()?;
        Ok(controller
            .store()
            .filter_patients(&term)
            .cloned()
            .map(Into::into)
            .collect())
    }

    /// Set the sidebar search term.
    pub fn set_search_term(&self, term: String) -> Result<(), RecordsError> {
        let mut controller = self.controller.lock()?;
        controller.set_search_term(term);
        Ok(())
    }

    /// Register a placeholder patient and select it.
    pub fn add_patient(&self) -> Result<FfiPatient, RecordsError> {
        let mut controller = self.controller.lock()?;
        Ok(controller.add_patient().into())
    }

    /// Select a patient.
    pub fn select_patient(&self, patient_id: String) -> Result<(), RecordsError> {
        let mut controller = self.controller.lock()?;
        Ok(controller.select_patient(&patient_id)?)
    }

    /// The selected patient, if any.
    pub fn selected_patient(&self) -> Result<Option<FfiPatient>, RecordsError> {
        let controller = self.controller.lock()?;
        Ok(controller.selected_patient().cloned().map(Into::into))
    }

    // =========================================================================
    // Visit Operations
    // =========================================================================

    /// Visits of the selected patient.
    pub fn list_visits(&self) -> Result<Vec<FfiVisit>, RecordsError> {
        let controller = self.controller.lock()?;
        Ok(controller
            .visits_for_selected()
            .cloned()
            .map(Into::into)
            .collect())
    }

    /// The selected visit, if any.
    pub fn selected_visit(&self) -> Result<Option<FfiVisit>, RecordsError> {
        let controller = self.controller.lock()?;
        Ok(controller.selected_visit().cloned().map(Into::into))
    }

    /// Open a visit in view mode.
    pub fn select_visit(&self, visit_id: String) -> Result<(), RecordsError> {
        let mut controller = self.controller.lock()?;
        Ok(controller.select_visit(&visit_id)?)
    }

    /// Create a visit for the selected patient; returns its ID.
    pub fn create_visit(&self) -> Result<String, RecordsError> {
        let mut controller = self.controller.lock()?;
        Ok(controller.create_visit()?)
    }

    /// Enter edit mode; returns the pre-filled form.
    pub fn start_edit(&self) -> Result<FfiVisitForm, RecordsError> {
        let mut controller = self.controller.lock()?;
        Ok(controller.start_edit()?.into())
    }

    /// Current form of the visit being edited, including medication changes.
    pub fn edit_form(&self) -> Result<FfiVisitForm, RecordsError> {
        let controller = self.controller.lock()?;
        Ok(controller.edit_form()?.into())
    }

    /// Leave edit mode without saving.
    pub fn cancel_edit(&self) -> Result<(), RecordsError> {
        let mut controller = self.controller.lock()?;
        Ok(controller.cancel_edit()?)
    }

    /// Validate and save the edit form. Medications come from the stored
    /// visit, not from `form`.
    pub fn save_visit(&self, form: FfiVisitForm) -> Result<(), RecordsError> {
        let mut controller = self.controller.lock()?;
        Ok(controller.save_visit(&form.into())?)
    }

    /// Delete a visit; returns whether it existed.
    pub fn delete_visit(&self, visit_id: String) -> Result<bool, RecordsError> {
        let mut controller = self.controller.lock()?;
        Ok(controller.delete_visit(&visit_id))
    }

    pub fn add_medication(&self, visit_id: String) -> Result<bool, RecordsError> {
        let mut controller = self.controller.lock()?;
        Ok(controller.add_medication(&visit_id))
    }

    pub fn remove_medication(&self, visit_id: String, index: u32) -> Result<bool, RecordsError> {
        let mut controller = self.controller.lock()?;
        Ok(controller.remove_medication(&visit_id, index as usize))
    }

    pub fn update_medication(
        &self,
        visit_id: String,
        index: u32,
        text: String,
    ) -> Result<bool, RecordsError> {
        let mut controller = self.controller.lock()?;
        Ok(controller.update_medication(&visit_id, index as usize, text))
    }

    // =========================================================================
    // Session Operations
    // =========================================================================

    /// Current selection state.
    pub fn session_state(&self) -> Result<FfiSessionState, RecordsError> {
        let controller = self.controller.lock()?;
        Ok(controller.state().clone().into())
    }

    /// Clear every record and the selection.
    pub fn logout(&self) -> Result<(), RecordsError> {
        let mut controller = self.controller.lock()?;
        controller.logout();
        Ok(())
    }

    /// Full screen snapshot as JSON.
    pub fn screen_json(&self) -> Result<String, RecordsError> {
        let controller = self.controller.lock()?;
        Ok(controller.screen().to_json()?)
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe patient.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub id: String,
    pub name: String,
    /// `YYYY-MM-DD`
    pub date_of_birth: String,
    pub gender: String,
    pub medical_record_number: String,
}

impl From<Patient> for FfiPatient {
    fn from(patient: Patient) -> Self {
        Self {
            id: patient.id,
            name: patient.name,
            date_of_birth: patient
                .date_of_birth
                .format(validation::DATE_FORMAT)
                .to_string(),
            gender: patient.gender.as_str().to_string(),
            medical_record_number: patient.medical_record_number,
        }
    }
}

/// FFI-safe vitals.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiVitals {
    pub temperature: Option<f64>,
    pub heart_rate: Option<f64>,
    pub blood_pressure: Option<String>,
}

impl From<Vitals> for FfiVitals {
    fn from(vitals: Vitals) -> Self {
        Self {
            temperature: vitals.temperature,
            heart_rate: vitals.heart_rate,
            blood_pressure: vitals.blood_pressure,
        }
    }
}

/// FFI-safe visit.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiVisit {
    pub id: String,
    pub patient_id: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub chief_complaint: String,
    pub diagnosis: String,
    pub notes: String,
    pub medications: Vec<String>,
    pub vitals: FfiVitals,
}

impl From<Visit> for FfiVisit {
    fn from(visit: Visit) -> Self {
        Self {
            id: visit.id,
            patient_id: visit.patient_id,
            date: visit.date.format(validation::DATE_FORMAT).to_string(),
            chief_complaint: visit.chief_complaint,
            diagnosis: visit.diagnosis,
            notes: visit.notes,
            medications: visit.medications,
            vitals: visit.vitals.into(),
        }
    }
}

/// FFI-safe visit form (raw input).
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiVisitForm {
    pub date: String,
    pub chief_complaint: String,
    pub diagnosis: String,
    pub notes: String,
    pub medications: Vec<String>,
    pub temperature: String,
    pub heart_rate: String,
    pub blood_pressure: String,
}

impl From<VisitForm> for FfiVisitForm {
    fn from(form: VisitForm) -> Self {
        Self {
            date: form.date,
            chief_complaint: form.chief_complaint,
            diagnosis: form.diagnosis,
            notes: form.notes,
            medications: form.medications,
            temperature: form.temperature,
            heart_rate: form.heart_rate,
            blood_pressure: form.blood_pressure,
        }
    }
}

impl From<FfiVisitForm> for VisitForm {
    fn from(form: FfiVisitForm) -> Self {
        VisitForm {
            date: form.date,
            chief_complaint: form.chief_complaint,
            diagnosis: form.diagnosis,
            notes: form.notes,
            medications: form.medications,
            temperature: form.temperature,
            heart_rate: form.heart_rate,
            blood_pressure: form.blood_pressure,
        }
    }
}

/// FFI-safe field-level validation message.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFieldError {
    pub field: String,
    pub message: String,
}

impl From<FieldError> for FfiFieldError {
    fn from(error: FieldError) -> Self {
        Self {
            field: error.field.as_str().to_string(),
            message: error.message,
        }
    }
}

/// FFI-safe session state.
#[derive(Debug, Clone, PartialEq, uniffi::Enum)]
pub enum FfiSessionState {
    Idle,
    PatientSelected {
        patient_id: String,
    },
    VisitSelected {
        patient_id: String,
        visit_id: String,
        editing: bool,
    },
}

impl From<SessionState> for FfiSessionState {
    fn from(state: SessionState) -> Self {
        match state {
            SessionState::Idle => FfiSessionState::Idle,
            SessionState::PatientSelected { patient_id } => {
                FfiSessionState::PatientSelected { patient_id }
            }
            SessionState::VisitSelected {
                patient_id,
                visit_id,
                mode,
            } => FfiSessionState::VisitSelected {
                patient_id,
                visit_id,
                editing: mode == VisitMode::Edit,
            },
        }
    }
}
