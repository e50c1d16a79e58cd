//! FFI surface tests, driven from Rust.

use patient_records_core::{
    open_records_with_config, validate_visit_form, FfiSessionState, FfiVisitForm, RecordsError,
};

fn form() -> FfiVisitForm {
    FfiVisitForm {
        date: "2024-05-01".into(),
        chief_complaint: "Checkup".into(),
        diagnosis: "Healthy".into(),
        notes: "Routine".into(),
        medications: vec!["Vitamin D".into()],
        temperature: "37.0".into(),
        heart_rate: String::new(),
        blood_pressure: String::new(),
    }
}

#[test]
fn test_ffi_visit_workflow() {
    let records = open_records_with_config(true, Some("2024-05-01".into())).unwrap();

    let patients = records.search_patients("smith".into()).unwrap();
    assert_eq!(patients.len(), 1);
    assert_eq!(patients[0].date_of_birth, "1985-10-22");
    assert_eq!(patients[0].gender, "Female");

    records.select_patient(patients[0].id.clone()).unwrap();
    let visit_id = records.create_visit().unwrap();
    assert_eq!(
        records.session_state().unwrap(),
        FfiSessionState::VisitSelected {
            patient_id: patients[0].id.clone(),
            visit_id: visit_id.clone(),
            editing: true,
        }
    );

    records.add_medication(visit_id.clone()).unwrap();
    records
        .update_medication(visit_id.clone(), 0, "Vitamin D".into())
        .unwrap();
    assert_eq!(records.edit_form().unwrap().medications, vec!["Vitamin D"]);

    records.save_visit(form()).unwrap();

    let visit = records.selected_visit().unwrap().unwrap();
    assert_eq!(visit.id, visit_id);
    assert_eq!(visit.date, "2024-05-01");
    assert_eq!(visit.vitals.temperature, Some(37.0));
    assert_eq!(visit.medications, vec!["Vitamin D"]);
    assert_eq!(records.list_visits().unwrap().len(), 3);
}

#[test]
fn test_ffi_errors_are_mapped() {
    let records = open_records_with_config(true, None).unwrap();

    assert!(matches!(
        records.select_patient("missing".into()),
        Err(RecordsError::NotFound(_))
    ));
    assert!(matches!(
        records.start_edit(),
        Err(RecordsError::InvalidState(_))
    ));

    records.select_patient("1".into()).unwrap();
    records.select_visit("v1".into()).unwrap();
    records.start_edit().unwrap();
    let mut bad = form();
    bad.notes.clear();
    assert!(matches!(
        records.save_visit(bad),
        Err(RecordsError::Validation(_))
    ));
}

#[test]
fn test_ffi_bad_config_date() {
    assert!(matches!(
        open_records_with_config(false, Some("not-a-date".into())),
        Err(RecordsError::InvalidInput(_))
    ));
}

#[test]
fn test_validate_visit_form() {
    assert!(validate_visit_form(form()).is_empty());

    let mut bad = form();
    bad.medications.clear();
    bad.heart_rate = "fast".into();
    let errors = validate_visit_form(bad);
    let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, vec!["medications", "heart_rate"]);
}

#[test]
fn test_ffi_logout_and_screen() {
    let records = open_records_with_config(true, None).unwrap();
    records.select_patient("1".into()).unwrap();
    assert!(records.screen_json().unwrap().contains("John Doe"));

    records.logout().unwrap();
    assert_eq!(records.session_state().unwrap(), FfiSessionState::Idle);
    assert!(records.search_patients(String::new()).unwrap().is_empty());
}
