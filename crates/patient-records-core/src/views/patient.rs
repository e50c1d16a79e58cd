//! Patient list and patient card views.

use serde::Serialize;

use super::long_date;
use crate::controller::RecordsController;
use crate::models::Patient;

/// One entry of the patient list.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PatientListItem {
    pub id: String,
    pub name: String,
    /// Highlighted as the active patient
    pub selected: bool,
}

/// Sidebar: search box and the filtered patient list.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Sidebar {
    pub search_term: String,
    pub patients: Vec<PatientListItem>,
}

impl Sidebar {
    pub fn build(controller: &RecordsController) -> Self {
        let selected = controller.state().patient_id();
        Self {
            search_term: controller.search_term().to_string(),
            patients: controller
                .filtered_patients()
                .map(|patient| PatientListItem {
                    id: patient.id.clone(),
                    name: patient.name.clone(),
                    selected: selected == Some(patient.id.as_str()),
                })
                .collect(),
        }
    }
}

/// Patient demographics panel.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PatientCard {
    pub name: String,
    pub medical_record_number: String,
    pub date_of_birth: String,
    pub gender: &'static str,
}

impl PatientCard {
    pub fn from_patient(patient: &Patient) -> Self {
        Self {
            name: patient.name.clone(),
            medical_record_number: patient.medical_record_number.clone(),
            date_of_birth: long_date(patient.date_of_birth),
            gender: patient.gender.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RecordsConfig;

    #[test]
    fn test_patient_card() {
        let controller = RecordsController::new(RecordsConfig::default());
        let patient = controller.store().get_patient("2").unwrap();

        let card = PatientCard::from_patient(patient);
        assert_eq!(card.name, "Jane Smith");
        assert_eq!(card.medical_record_number, "67890");
        assert_eq!(card.date_of_birth, "October 22nd, 1985");
        assert_eq!(card.gender, "Female");
    }

    #[test]
    fn test_sidebar_marks_selection_and_filters() {
        let mut controller = RecordsController::new(RecordsConfig::default());
        controller.select_patient("4").unwrap();
        controller.set_search_term("br");

        let sidebar = Sidebar::build(&controller);
        assert_eq!(sidebar.search_term, "br");
        assert_eq!(
            sidebar.patients,
            vec![PatientListItem {
                id: "4".into(),
                name: "Alice Brown".into(),
                selected: true,
            }]
        );
    }
}
