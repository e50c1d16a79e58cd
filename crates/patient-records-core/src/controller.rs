//! Records controller.
//!
//! The single owner of the record store, the session state and the search
//! term. Views borrow it read-only; every mutation goes through one of the
//! methods below.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::RecordsConfig;
use crate::models::{NewPatient, Patient, Visit, VisitUpdate};
use crate::session::{SessionEvent, SessionState, TransitionError};
use crate::store::RecordStore;
use crate::validation::{ValidationErrors, VisitForm};
use crate::views::Screen;

/// Controller errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ControllerError {
    #[error("Patient not found: {0}")]
    PatientNotFound(String),

    #[error("Visit not found: {0}")]
    VisitNotFound(String),

    #[error("No visit is selected")]
    NoVisitSelected,

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),
}

pub type ControllerResult<T> = Result<T, ControllerError>;

/// Patient records session.
#[derive(Debug, Clone)]
pub struct RecordsController {
    store: RecordStore,
    state: SessionState,
    search_term: String,
    config: RecordsConfig,
}

impl Default for RecordsController {
    fn default() -> Self {
        Self::new(RecordsConfig::default())
    }
}

impl RecordsController {
    /// Open a session. The store is seeded when the config asks for it.
    pub fn new(config: RecordsConfig) -> Self {
        let store = if config.seed_mock_data {
            RecordStore::seeded()
        } else {
            RecordStore::new()
        };
        info!(
            patients = store.patient_count(),
            visits = store.visit_count(),
            "records session opened"
        );
        Self {
            store,
            state: SessionState::Idle,
            search_term: String::new(),
            config,
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &RecordsConfig {
        &self.config
    }

    // =========================================================================
    // Patient Directory
    // =========================================================================

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Patients matching the current search term.
    pub fn filtered_patients(&self) -> impl Iterator<Item = &Patient> + Clone + '_ {
        self.store.filter_patients(&self.search_term)
    }

    /// Register a placeholder patient and select it.
    pub fn add_patient(&mut self) -> Patient {
        let patient = self.store.add_patient(NewPatient::placeholder()).clone();
        info!(patient_id = %patient.id, mrn = %patient.medical_record_number, "patient added");
        self.state = SessionState::PatientSelected {
            patient_id: patient.id.clone(),
        };
        patient
    }

    /// Make a patient active. Clears any selected visit and any edit.
    pub fn select_patient(&mut self, patient_id: &str) -> ControllerResult<()> {
        if self.store.get_patient(patient_id).is_none() {
            warn!(patient_id, "select of unknown patient");
            return Err(ControllerError::PatientNotFound(patient_id.to_string()));
        }
        self.state
            .apply(SessionEvent::SelectPatient(patient_id.to_string()))?;
        debug!(patient_id, "patient selected");
        Ok(())
    }

    pub fn selected_patient(&self) -> Option<&Patient> {
        self.state
            .patient_id()
            .and_then(|id| self.store.get_patient(id))
    }

    // =========================================================================
    // Visit Ledger
    // =========================================================================

    /// Visits of the selected patient, in insertion order. Empty when no
    /// patient is selected.
    pub fn visits_for_selected(&self) -> impl Iterator<Item = &Visit> + Clone + '_ {
        self.state
            .patient_id()
            .into_iter()
            .flat_map(move |patient_id| self.store.list_visits_for_patient(patient_id))
    }

    pub fn selected_visit(&self) -> Option<&Visit> {
        self.state.visit_id().and_then(|id| self.store.get_visit(id))
    }

    /// Open one of the selected patient's visits in view mode.
    pub fn select_visit(&mut self, visit_id: &str) -> ControllerResult<()> {
        let next = self
            .state
            .next(SessionEvent::SelectVisit(visit_id.to_string()))
            .inspect_err(|err| warn!(visit_id, %err, "visit select rejected"))?;

        let belongs = self
            .store
            .get_visit(visit_id)
            .is_some_and(|visit| Some(visit.patient_id.as_str()) == self.state.patient_id());
        if !belongs {
            warn!(visit_id, "select of visit outside the selected patient");
            return Err(ControllerError::VisitNotFound(visit_id.to_string()));
        }

        self.state = next;
        debug!(visit_id, "visit selected");
        Ok(())
    }

    /// Create an empty visit for the selected patient, dated today, and open
    /// it straight in edit mode. Returns the new visit ID.
    pub fn create_visit(&mut self) -> ControllerResult<String> {
        let patient_id = match self.state.patient_id() {
            Some(id) => id.to_string(),
            None => {
                let err = TransitionError {
                    event: "create visit",
                    state: self.state.describe(),
                };
                warn!(%err, "visit create rejected");
                return Err(err.into());
            }
        };

        let today = self.config.today();
        let visit_id = self.store.create_visit(&patient_id, today).id.clone();
        self.state
            .apply(SessionEvent::VisitCreated(visit_id.clone()))?;

        info!(%patient_id, %visit_id, date = %today, "visit created");
        Ok(visit_id)
    }

    /// Enter edit mode on the selected visit, returning the pre-filled form.
    pub fn start_edit(&mut self) -> ControllerResult<VisitForm> {
        let next = self
            .state
            .next(SessionEvent::StartEdit)
            .inspect_err(|err| warn!(%err, "edit rejected"))?;
        let form = self
            .selected_visit()
            .map(VisitForm::from_visit)
            .ok_or(ControllerError::NoVisitSelected)?;

        self.state = next;
        debug!(visit_id = self.state.visit_id(), "edit started");
        Ok(form)
    }

    /// Leave edit mode without saving.
    pub fn cancel_edit(&mut self) -> ControllerResult<()> {
        self.state
            .apply(SessionEvent::CancelEdit)
            .inspect_err(|err| warn!(%err, "cancel rejected"))?;
        debug!(visit_id = self.state.visit_id(), "edit cancelled");
        Ok(())
    }

    /// The form for the visit being edited, rebuilt from the stored visit.
    ///
    /// Reflects medication changes made since `start_edit`.
    pub fn edit_form(&self) -> ControllerResult<VisitForm> {
        if !self.state.is_editing() {
            return Err(TransitionError {
                event: "read edit form",
                state: self.state.describe(),
            }
            .into());
        }
        self.selected_visit()
            .map(VisitForm::from_visit)
            .ok_or(ControllerError::NoVisitSelected)
    }

    /// Validate the form and, if it passes, replace the selected visit's
    /// fields and return to view mode.
    ///
    /// Medications are read from the stored visit, which the medication
    /// operations keep current during the edit. The form's own list is
    /// ignored. A failing form leaves both the ledger and the edit state
    /// untouched.
    pub fn save_visit(&mut self, form: &VisitForm) -> ControllerResult<()> {
        let next = self
            .state
            .next(SessionEvent::SaveCompleted)
            .inspect_err(|err| warn!(%err, "save rejected"))?;
        let visit_id = self
            .state
            .visit_id()
            .ok_or(ControllerError::NoVisitSelected)?
            .to_string();

        let medications = match self.store.get_visit(&visit_id) {
            Some(visit) => visit.medications.clone(),
            None => {
                warn!(%visit_id, "save against missing visit");
                return Err(ControllerError::VisitNotFound(visit_id));
            }
        };
        let form = VisitForm {
            medications,
            ..form.clone()
        };

        let validated = form.validate().inspect_err(|errors| {
            warn!(%visit_id, invalid_fields = errors.len(), "visit form rejected")
        })?;

        self.store
            .update_visit(&visit_id, VisitUpdate::from(validated));

        self.state = next;
        info!(%visit_id, "visit saved");
        Ok(())
    }

    /// Delete a visit. If it was selected the session falls back to the
    /// patient. Returns whether a visit was removed.
    pub fn delete_visit(&mut self, visit_id: &str) -> bool {
        let removed = self.store.delete_visit(visit_id);
        if let Err(err) = self
            .state
            .apply(SessionEvent::VisitDeleted(visit_id.to_string()))
        {
            warn!(visit_id, %err, "selection not updated after delete");
        }

        if removed {
            info!(visit_id, "visit deleted");
        } else {
            warn!(visit_id, "delete of unknown visit ignored");
        }
        removed
    }

    pub fn add_medication(&mut self, visit_id: &str) -> bool {
        let changed = self.store.add_medication(visit_id);
        if !changed {
            warn!(visit_id, "add medication on unknown visit ignored");
        }
        changed
    }

    pub fn remove_medication(&mut self, visit_id: &str, index: usize) -> bool {
        let changed = self.store.remove_medication(visit_id, index);
        if !changed {
            warn!(visit_id, index, "remove medication ignored");
        }
        changed
    }

    pub fn update_medication(&mut self, visit_id: &str, index: usize, text: String) -> bool {
        let changed = self.store.update_medication(visit_id, index, text);
        if !changed {
            warn!(visit_id, index, "update medication ignored");
        }
        changed
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Drop every record and the selection. There is no undo.
    pub fn logout(&mut self) {
        let patients = self.store.patient_count();
        let visits = self.store.visit_count();
        self.store.clear();
        self.search_term.clear();
        self.state = self.state.next(SessionEvent::Reset).unwrap_or_default();
        info!(patients, visits, "logged out, records cleared");
    }

    /// Read-only snapshot of everything a view needs.
    pub fn screen(&self) -> Screen {
        Screen::build(self)
    }
}
