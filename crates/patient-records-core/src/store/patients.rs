//! Patient directory operations.

use super::RecordStore;
use crate::models::{NewPatient, Patient};

impl RecordStore {
    /// Register a patient under a freshly generated identifier.
    pub fn add_patient(&mut self, fields: NewPatient) -> &Patient {
        let index = self.patients.len();
        self.patients.push(Patient::new(fields));
        &self.patients[index]
    }

    /// Get a patient by ID.
    pub fn get_patient(&self, id: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    /// List all patients in registration order.
    pub fn list_patients(&self) -> &[Patient] {
        &self.patients
    }

    /// Search patients by name (case-insensitive) or medical record number
    /// (case-sensitive substring).
    ///
    /// The returned iterator is lazy and `Clone`, so a view can walk it more
    /// than once without re-running the lookup setup. An empty term yields
    /// every patient.
    pub fn filter_patients<'a>(
        &'a self,
        term: &'a str,
    ) -> impl Iterator<Item = &'a Patient> + Clone + 'a {
        let needle_lower = term.to_lowercase();
        self.patients
            .iter()
            .filter(move |patient| patient.matches(&needle_lower, term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;
    use chrono::NaiveDate;

    fn setup_store() -> RecordStore {
        RecordStore::seeded()
    }

    fn names<'a>(patients: impl Iterator<Item = &'a Patient>) -> Vec<&'a str> {
        patients.map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_add_and_get() {
        let mut store = RecordStore::new();

        let id = store
            .add_patient(NewPatient {
                name: "Max Power".into(),
                date_of_birth: NaiveDate::from_ymd_opt(1980, 2, 29).unwrap(),
                gender: Gender::Male,
                medical_record_number: "55555".into(),
            })
            .id
            .clone();

        let retrieved = store.get_patient(&id).unwrap();
        assert_eq!(retrieved.name, "Max Power");
        assert_eq!(retrieved.medical_record_number, "55555");
        assert_eq!(store.list_patients().len(), 1);
    }

    #[test]
    fn test_add_appends_in_order() {
        let mut store = setup_store();
        let id = store.add_patient(NewPatient::placeholder()).id.clone();
        assert_eq!(store.list_patients().last().unwrap().id, id);
        assert_eq!(store.patient_count(), 6);
    }

    #[test]
    fn test_get_unknown_patient() {
        let store = setup_store();
        assert!(store.get_patient("nope").is_none());
    }

    #[test]
    fn test_filter_empty_term_returns_all() {
        let store = setup_store();
        assert_eq!(store.filter_patients("").count(), 5);
    }

    #[test]
    fn test_filter_name_is_case_insensitive() {
        let store = setup_store();
        assert_eq!(names(store.filter_patients("jOhN")), vec!["John Doe"]);
        assert_eq!(
            names(store.filter_patients("o")),
            vec!["John Doe", "Robert Jones", "Alice Brown"]
        );
    }

    #[test]
    fn test_filter_by_record_number() {
        let store = setup_store();
        assert_eq!(names(store.filter_patients("678")), vec!["Jane Smith"]);
        assert_eq!(
            names(store.filter_patients("13")),
            vec!["Alice Brown"]
        );
    }

    #[test]
    fn test_filter_record_number_is_case_sensitive() {
        let mut store = RecordStore::new();
        store.add_patient(NewPatient {
            name: "Zed".into(),
            date_of_birth: NaiveDate::from_ymd_opt(1970, 1, 1).unwrap(),
            gender: Gender::Other,
            medical_record_number: "MRN-X1".into(),
        });

        assert_eq!(store.filter_patients("MRN-X").count(), 1);
        assert_eq!(store.filter_patients("mrn-x").count(), 0);
    }

    #[test]
    fn test_filter_no_match() {
        let store = setup_store();
        assert_eq!(store.filter_patients("zzz").count(), 0);
    }

    #[test]
    fn test_filter_is_restartable() {
        let store = setup_store();
        let results = store.filter_patients("smith");
        let first_pass: Vec<_> = results.clone().collect();
        let second_pass: Vec<_> = results.collect();
        assert_eq!(first_pass, second_pass);
        assert_eq!(first_pass.len(), 1);
    }
}
