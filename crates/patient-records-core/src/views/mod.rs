//! Read-only view snapshots for the host UI.
//!
//! Everything here is derived from a `&RecordsController`; nothing in this
//! module mutates state. Snapshots serialize to JSON for hosts that render
//! outside Rust.

mod patient;
mod visit;

pub use patient::*;
pub use visit::*;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::controller::RecordsController;

/// Shown in place of the patient card when no patient is selected.
pub const NO_PATIENT_SELECTED: &str = "Select a patient to view details.";
/// Shown in place of the visit detail when a patient but no visit is selected.
pub const NO_VISIT_SELECTED: &str = "Select a visit to view details.";
/// Shown in place of the visit table when the patient has no visits.
pub const NO_VISITS_RECORDED: &str = "No visits recorded for this patient.";
/// Shown for a vital sign that was not recorded.
pub const MISSING_VALUE: &str = "-";

/// Everything on screen at once.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Screen {
    pub sidebar: Sidebar,
    pub patient: Option<PatientCard>,
    pub visits: Option<VisitTable>,
    pub visit: Option<VisitDetail>,
    pub notice: Option<&'static str>,
}

impl Screen {
    pub fn build(controller: &RecordsController) -> Self {
        let patient = controller.selected_patient();
        let selected_visit_id = controller.state().visit_id();
        let visit = controller
            .selected_visit()
            .map(|visit| VisitDetail::build(visit, controller.state().is_editing()));
        let notice = match (patient, &visit) {
            (None, _) => Some(NO_PATIENT_SELECTED),
            (Some(_), None) => Some(NO_VISIT_SELECTED),
            (Some(_), Some(_)) => None,
        };

        Self {
            sidebar: Sidebar::build(controller),
            patient: patient.map(PatientCard::from_patient),
            visits: patient.map(|_| {
                VisitTable::build(controller.visits_for_selected(), selected_visit_id)
            }),
            visit,
            notice,
        }
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Long-form date, e.g. "May 15th, 1990".
pub fn long_date(date: NaiveDate) -> String {
    format!(
        "{} {}, {}",
        date.format("%B"),
        ordinal(date.day()),
        date.year()
    )
}

fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RecordsConfig;

    fn setup_controller() -> RecordsController {
        RecordsController::new(RecordsConfig {
            seed_mock_data: true,
            today: NaiveDate::from_ymd_opt(2024, 5, 1),
        })
    }

    #[test]
    fn test_long_date() {
        let cases = [
            ((1990, 5, 15), "May 15th, 1990"),
            ((1985, 10, 22), "October 22nd, 1985"),
            ((2002, 3, 8), "March 8th, 2002"),
            ((1998, 12, 1), "December 1st, 1998"),
            ((2024, 2, 3), "February 3rd, 2024"),
            ((2024, 1, 11), "January 11th, 2024"),
            ((2024, 1, 12), "January 12th, 2024"),
            ((2024, 1, 13), "January 13th, 2024"),
            ((2024, 3, 31), "March 31st, 2024"),
        ];
        for ((y, m, d), expected) in cases {
            let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
            assert_eq!(long_date(date), expected, "{}", date);
        }
    }

    #[test]
    fn test_idle_screen() {
        let screen = setup_controller().screen();
        assert_eq!(screen.sidebar.patients.len(), 5);
        assert!(screen.patient.is_none());
        assert!(screen.visits.is_none());
        assert!(screen.visit.is_none());
        assert_eq!(screen.notice, Some(NO_PATIENT_SELECTED));
    }

    #[test]
    fn test_patient_selected_screen_asks_for_visit() {
        let mut controller = setup_controller();
        controller.select_patient("1").unwrap();

        let screen = controller.screen();
        assert_eq!(screen.patient.unwrap().name, "John Doe");
        assert!(screen.visit.is_none());
        assert_eq!(screen.notice, Some(NO_VISIT_SELECTED));
    }

    #[test]
    fn test_visit_selected_screen() {
        let mut controller = setup_controller();
        controller.select_patient("2").unwrap();
        controller.select_visit("v7").unwrap();

        let screen = controller.screen();
        assert_eq!(screen.notice, None);
        assert_eq!(screen.patient.unwrap().name, "Jane Smith");

        let rows = screen.visits.unwrap().rows;
        assert_eq!(rows.len(), 2);
        assert!(!rows[0].selected);
        assert!(rows[1].selected);

        let detail = screen.visit.unwrap();
        assert_eq!(detail.title, "Visit Details - February 3rd, 2024");
        assert!(!detail.editing);
    }

    #[test]
    fn test_screen_to_json() {
        let mut controller = setup_controller();
        controller.select_patient("1").unwrap();
        let json = controller.screen().to_json().unwrap();
        assert!(json.contains("\"name\": \"John Doe\""));
        assert!(json.contains("Fever and cough"));
    }
}
