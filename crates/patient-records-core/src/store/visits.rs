//! Visit ledger operations.
//!
//! Mutations against an unknown visit ID are no-ops. They report whether
//! anything changed instead of failing, mirroring a row count of zero.

use chrono::NaiveDate;

use super::RecordStore;
use crate::models::{Visit, VisitUpdate};

impl RecordStore {
    /// Create an empty visit for a patient and append it to the ledger.
    ///
    /// The patient ID is not checked against the directory.
    pub fn create_visit(&mut self, patient_id: &str, date: NaiveDate) -> &Visit {
        let index = self.visits.len();
        self.visits.push(Visit::new(patient_id.to_string(), date));
        &self.visits[index]
    }

    /// Get a visit by ID.
    pub fn get_visit(&self, id: &str) -> Option<&Visit> {
        self.visits.iter().find(|v| v.id == id)
    }

    /// All visits of a patient, in insertion order.
    pub fn list_visits_for_patient<'a>(
        &'a self,
        patient_id: &'a str,
    ) -> impl Iterator<Item = &'a Visit> + Clone + 'a {
        self.visits.iter().filter(move |v| v.patient_id == patient_id)
    }

    /// Replace the named fields of a visit.
    pub fn update_visit(&mut self, id: &str, update: VisitUpdate) -> bool {
        match self.visit_mut(id) {
            Some(visit) => {
                visit.apply(update);
                true
            }
            None => false,
        }
    }

    /// Delete a visit.
    pub fn delete_visit(&mut self, id: &str) -> bool {
        let before = self.visits.len();
        self.visits.retain(|v| v.id != id);
        self.visits.len() < before
    }

    /// Append a blank medication entry.
    pub fn add_medication(&mut self, id: &str) -> bool {
        match self.visit_mut(id) {
            Some(visit) => {
                visit.medications.push(String::new());
                true
            }
            None => false,
        }
    }

    /// Remove the medication at `index`. Out-of-range indices leave the
    /// list untouched.
    pub fn remove_medication(&mut self, id: &str, index: usize) -> bool {
        match self.visit_mut(id) {
            Some(visit) if index < visit.medications.len() => {
                visit.medications.remove(index);
                true
            }
            _ => false,
        }
    }

    /// Replace the text of the medication at `index`.
    pub fn update_medication(&mut self, id: &str, index: usize, text: String) -> bool {
        match self
            .visit_mut(id)
            .and_then(|visit| visit.medications.get_mut(index))
        {
            Some(entry) => {
                *entry = text;
                true
            }
            None => false,
        }
    }

    fn visit_mut(&mut self, id: &str) -> Option<&mut Visit> {
        self.visits.iter_mut().find(|v| v.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Vitals;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn setup_store() -> RecordStore {
        RecordStore::seeded()
    }

    fn ids<'a>(visits: impl Iterator<Item = &'a Visit>) -> Vec<&'a str> {
        visits.map(|v| v.id.as_str()).collect()
    }

    #[test]
    fn test_list_for_patient_in_insertion_order() {
        let store = setup_store();
        assert_eq!(ids(store.list_visits_for_patient("1")), vec!["v1", "v2"]);
        assert_eq!(ids(store.list_visits_for_patient("2")), vec!["v3", "v7"]);
        assert_eq!(store.list_visits_for_patient("missing").count(), 0);
    }

    #[test]
    fn test_create_visit() {
        let mut store = setup_store();
        let id = store.create_visit("2", today()).id.clone();

        let visits: Vec<_> = store.list_visits_for_patient("2").collect();
        assert_eq!(visits.len(), 3);

        let created = visits.last().unwrap();
        assert_eq!(created.id, id);
        assert_eq!(created.date, today());
        assert!(created.is_blank());
    }

    #[test]
    fn test_update_visit() {
        let mut store = setup_store();

        let changed = store.update_visit(
            "v4",
            VisitUpdate {
                diagnosis: Some("Tension headache".into()),
                medications: Some(vec!["Ibuprofen 400mg PRN".into()]),
                ..Default::default()
            },
        );
        assert!(changed);

        let visit = store.get_visit("v4").unwrap();
        assert_eq!(visit.diagnosis, "Tension headache");
        assert_eq!(visit.medications, vec!["Ibuprofen 400mg PRN"]);
        assert_eq!(visit.chief_complaint, "Headache");
    }

    #[test]
    fn test_update_unknown_visit_is_noop() {
        let mut store = setup_store();
        let before = store.clone();

        let changed = store.update_visit(
            "missing",
            VisitUpdate {
                notes: Some("lost".into()),
                ..Default::default()
            },
        );

        assert!(!changed);
        assert_eq!(store.visits, before.visits);
    }

    #[test]
    fn test_delete_visit() {
        let mut store = setup_store();
        assert!(store.delete_visit("v1"));
        assert_eq!(ids(store.list_visits_for_patient("1")), vec!["v2"]);
        assert!(!store.delete_visit("v1"));
        assert_eq!(store.visit_count(), 6);
    }

    #[test]
    fn test_add_then_remove_medication_round_trip() {
        let mut store = RecordStore::new();
        let id = store.create_visit("p", today()).id.clone();

        assert!(store.add_medication(&id));
        assert_eq!(store.get_visit(&id).unwrap().medications, vec![""]);

        assert!(store.remove_medication(&id, 0));
        assert!(store.get_visit(&id).unwrap().medications.is_empty());
    }

    #[test]
    fn test_remove_medication_keeps_order() {
        let mut store = setup_store();
        assert!(store.remove_medication("v3", 0));
        assert_eq!(
            store.get_visit("v3").unwrap().medications,
            vec!["Ceftriaxone 1g IV"]
        );
    }

    #[test]
    fn test_remove_medication_out_of_range_is_noop() {
        let mut store = setup_store();
        assert!(!store.remove_medication("v3", 2));
        assert!(!store.remove_medication("missing", 0));
        assert_eq!(store.get_visit("v3").unwrap().medications.len(), 2);
    }

    #[test]
    fn test_update_medication() {
        let mut store = setup_store();
        store.add_medication("v5");

        assert!(store.update_medication("v5", 1, "Antacid PRN".into()));
        assert!(!store.update_medication("v5", 9, "ignored".into()));
        assert_eq!(
            store.get_visit("v5").unwrap().medications,
            vec!["Omeprazole 20mg daily", "Antacid PRN"]
        );
    }

    #[test]
    fn test_duplicate_medications_allowed() {
        let mut store = RecordStore::new();
        let id = store.create_visit("p", today()).id.clone();
        store.add_medication(&id);
        store.add_medication(&id);
        assert_eq!(store.get_visit(&id).unwrap().medications, vec!["", ""]);
    }

    #[test]
    fn test_vitals_untouched_by_medication_edits() {
        let mut store = setup_store();
        store.add_medication("v1");
        assert_eq!(
            store.get_visit("v1").unwrap().vitals,
            Vitals {
                temperature: Some(39.2),
                heart_rate: Some(110.0),
                blood_pressure: Some("130/80".into()),
            }
        );
    }
}
