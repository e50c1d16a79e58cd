//! Mock data set loaded into a freshly opened store.

use chrono::NaiveDate;

use crate::models::{Gender, Patient, Visit, Vitals};

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn patient(id: &str, name: &str, dob: NaiveDate, gender: Gender, mrn: &str) -> Patient {
    Patient {
        id: id.into(),
        name: name.into(),
        date_of_birth: dob,
        gender,
        medical_record_number: mrn.into(),
    }
}

#[allow(clippy::too_many_arguments)]
fn visit(
    id: &str,
    patient_id: &str,
    date: NaiveDate,
    chief_complaint: &str,
    diagnosis: &str,
    notes: &str,
    medications: &[&str],
    vitals: (f64, f64, &str),
) -> Visit {
    let (temperature, heart_rate, blood_pressure) = vitals;
    Visit {
        id: id.into(),
        patient_id: patient_id.into(),
        date,
        chief_complaint: chief_complaint.into(),
        diagnosis: diagnosis.into(),
        notes: notes.into(),
        medications: medications.iter().map(|m| m.to_string()).collect(),
        vitals: Vitals {
            temperature: Some(temperature),
            heart_rate: Some(heart_rate),
            blood_pressure: Some(blood_pressure.into()),
        },
    }
}

/// The five demo patients.
pub fn mock_patients() -> Vec<Patient> {
    vec![
        patient("1", "John Doe", ymd(1990, 5, 15), Gender::Male, "12345"),
        patient("2", "Jane Smith", ymd(1985, 10, 22), Gender::Female, "67890"),
        patient("3", "Robert Jones", ymd(2002, 3, 8), Gender::Male, "24680"),
        patient("4", "Alice Brown", ymd(1998, 12, 1), Gender::Female, "13579"),
        patient("5", "Michael Davis", ymd(1976, 7, 19), Gender::Male, "98765"),
    ]
}

/// The seven demo visits. Patient 2 has a visit appended out of date order
/// (`v7`), which keeps insertion order and date order distinguishable.
pub fn mock_visits() -> Vec<Visit> {
    vec![
        visit(
            "v1",
            "1",
            ymd(2024, 1, 10),
            "Fever and cough",
            "Influenza",
            "Patient presented with a high fever and persistent cough. Prescribed Tamiflu and advised to rest.",
            &["Tamiflu 75mg BID x 5 days"],
            (39.2, 110.0, "130/80"),
        ),
        visit(
            "v2",
            "1",
            ymd(2024, 1, 15),
            "Follow-up visit",
            "Influenza",
            "Patient reports improvement in symptoms. Fever subsided. Continue medication as prescribed.",
            &["Tamiflu 75mg BID x 5 days"],
            (37.0, 80.0, "120/70"),
        ),
        visit(
            "v3",
            "2",
            ymd(2024, 2, 1),
            "Abdominal pain",
            "Appendicitis",
            "Patient presented with severe right lower quadrant pain. CT scan confirmed appendicitis. Scheduled for surgery.",
            &["IV fluids", "Ceftriaxone 1g IV"],
            (38.5, 100.0, "140/90"),
        ),
        visit(
            "v4",
            "3",
            ymd(2024, 2, 15),
            "Headache",
            "Migraine",
            "Patient reports severe headache with nausea. Prescribed sumatriptan.",
            &["Sumatriptan 100mg PRN"],
            (37.2, 72.0, "110/70"),
        ),
        visit(
            "v5",
            "4",
            ymd(2024, 3, 1),
            "Chest pain",
            "GERD",
            "Patient reports chest pain, worse after eating. Prescribed omeprazole.",
            &["Omeprazole 20mg daily"],
            (36.8, 78.0, "125/80"),
        ),
        visit(
            "v6",
            "5",
            ymd(2024, 3, 10),
            "Rash",
            "Allergic reaction",
            "Patient presented with a widespread rash after taking new medication. Discontinued medication and prescribed antihistamines.",
            &["Cetirizine 10mg daily"],
            (37.5, 85.0, "130/85"),
        ),
        visit(
            "v7",
            "2",
            ymd(2024, 2, 3),
            "Post-operative check",
            "Appendicitis",
            "Patient recovering well from appendectomy. Wound clean and dry. Discharge instructions given.",
            &["Pain medication PRN"],
            (37.0, 75.0, "120/80"),
        ),
    ]
}
