//! Selection and edit state machine.
//!
//! ```text
//!   event            from                         to
//!   SelectPatient    any                          PatientSelected
//!   SelectVisit      PatientSelected, Visit(*)    Visit(View)
//!   StartEdit        Visit(View)                  Visit(Edit)
//!   CancelEdit       Visit(Edit)                  Visit(View)
//!   SaveCompleted    Visit(Edit)                  Visit(View)
//!   VisitCreated     PatientSelected, Visit(*)    Visit(Edit)
//!   VisitDeleted     Visit(*) on that visit       PatientSelected
//!   Reset            any                          Idle
//! ```
//!
//! The edit flag only exists inside [`SessionState::VisitSelected`], so
//! "editing with no visit selected" cannot be expressed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Whether the selected visit is being viewed or edited.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum VisitMode {
    View,
    Edit,
}

/// Current selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum SessionState {
    /// No patient selected
    #[default]
    Idle,
    /// Patient active, no visit active
    PatientSelected { patient_id: String },
    /// Patient and one of its visits active
    VisitSelected {
        patient_id: String,
        visit_id: String,
        mode: VisitMode,
    },
}

/// User intents that move the session between states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SelectPatient(String),
    SelectVisit(String),
    StartEdit,
    CancelEdit,
    SaveCompleted,
    VisitCreated(String),
    VisitDeleted(String),
    Reset,
}

impl SessionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::SelectPatient(_) => "select patient",
            SessionEvent::SelectVisit(_) => "select visit",
            SessionEvent::StartEdit => "start edit",
            SessionEvent::CancelEdit => "cancel edit",
            SessionEvent::SaveCompleted => "save",
            SessionEvent::VisitCreated(_) => "create visit",
            SessionEvent::VisitDeleted(_) => "delete visit",
            SessionEvent::Reset => "reset",
        }
    }
}

/// An event that is not allowed in the current state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cannot {event} while {state}")]
pub struct TransitionError {
    pub event: &'static str,
    pub state: &'static str,
}

impl SessionState {
    /// Short description of the state, for logs and errors.
    pub fn describe(&self) -> &'static str {
        match self {
            SessionState::Idle => "no patient is selected",
            SessionState::PatientSelected { .. } => "no visit is selected",
            SessionState::VisitSelected {
                mode: VisitMode::View,
                ..
            } => "viewing a visit",
            SessionState::VisitSelected {
                mode: VisitMode::Edit,
                ..
            } => "editing a visit",
        }
    }

    pub fn patient_id(&self) -> Option<&str> {
        match self {
            SessionState::Idle => None,
            SessionState::PatientSelected { patient_id }
            | SessionState::VisitSelected { patient_id, .. } => Some(patient_id),
        }
    }

    pub fn visit_id(&self) -> Option<&str> {
        match self {
            SessionState::VisitSelected { visit_id, .. } => Some(visit_id),
            _ => None,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(
            self,
            SessionState::VisitSelected {
                mode: VisitMode::Edit,
                ..
            }
        )
    }

    /// Compute the state that follows `event`.
    ///
    /// Membership checks (does the visit belong to the patient, does the
    /// patient exist) are the caller's job; this only enforces the shape of
    /// the transitions.
    pub fn next(&self, event: SessionEvent) -> Result<SessionState, TransitionError> {
        use SessionEvent as E;
        use SessionState as S;

        let rejected = |event: &SessionEvent| TransitionError {
            event: event.name(),
            state: self.describe(),
        };

        match (self, event) {
            (_, E::SelectPatient(patient_id)) => Ok(S::PatientSelected { patient_id }),
            (_, E::Reset) => Ok(S::Idle),

            (
                S::PatientSelected { patient_id } | S::VisitSelected { patient_id, .. },
                E::SelectVisit(visit_id),
            ) => Ok(S::VisitSelected {
                patient_id: patient_id.clone(),
                visit_id,
                mode: VisitMode::View,
            }),

            (
                S::VisitSelected {
                    patient_id,
                    visit_id,
                    mode: VisitMode::View,
                },
                E::StartEdit,
            ) => Ok(S::VisitSelected {
                patient_id: patient_id.clone(),
                visit_id: visit_id.clone(),
                mode: VisitMode::Edit,
            }),

            (
                S::VisitSelected {
                    patient_id,
                    visit_id,
                    mode: VisitMode::Edit,
                },
                E::CancelEdit | E::SaveCompleted,
            ) => Ok(S::VisitSelected {
                patient_id: patient_id.clone(),
                visit_id: visit_id.clone(),
                mode: VisitMode::View,
            }),

            (
                S::PatientSelected { patient_id } | S::VisitSelected { patient_id, .. },
                E::VisitCreated(visit_id),
            ) => Ok(S::VisitSelected {
                patient_id: patient_id.clone(),
                visit_id,
                mode: VisitMode::Edit,
            }),

            (
                S::VisitSelected {
                    patient_id,
                    visit_id,
                    ..
                },
                E::VisitDeleted(deleted),
            ) if *visit_id == deleted => Ok(S::PatientSelected {
                patient_id: patient_id.clone(),
            }),
            (state, E::VisitDeleted(_)) => Ok(state.clone()),

            (_, event) => Err(rejected(&event)),
        }
    }

    /// Apply `event` in place. On error the state is unchanged.
    pub fn apply(&mut self, event: SessionEvent) -> Result<(), TransitionError> {
        *self = self.next(event)?;
        Ok(())
    }
}
