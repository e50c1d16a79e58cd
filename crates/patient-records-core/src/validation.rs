//! Visit form validation.
//!
//! A [`VisitForm`] holds raw form input exactly as typed. [`VisitForm::validate`]
//! turns it into a [`ValidatedVisit`] or reports every failing field at once.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Visit, VisitUpdate, Vitals};

/// Date format accepted by the date field.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fields of the visit form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FormField {
    Date,
    ChiefComplaint,
    Diagnosis,
    Notes,
    Medications,
    Temperature,
    HeartRate,
    BloodPressure,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Date => "date",
            FormField::ChiefComplaint => "chief_complaint",
            FormField::Diagnosis => "diagnosis",
            FormField::Notes => "notes",
            FormField::Medications => "medications",
            FormField::Temperature => "temperature",
            FormField::HeartRate => "heart_rate",
            FormField::BloodPressure => "blood_pressure",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message attached to one form field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

/// Every field-level failure of one submission.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("visit form has {} invalid field(s): {}", .0.len(), summarize(.0))]
pub struct ValidationErrors(pub Vec<FieldError>);

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    /// Message for a field, if that field failed.
    pub fn message_for(&self, field: FormField) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.0.iter().map(|e| e.field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Raw visit form input.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VisitForm {
    /// `YYYY-MM-DD`
    pub date: String,
    pub chief_complaint: String,
    pub diagnosis: String,
    pub notes: String,
    pub medications: Vec<String>,
    /// Numeric text; blank means not recorded
    pub temperature: String,
    /// Numeric text; blank means not recorded
    pub heart_rate: String,
    /// Free text; blank means not recorded
    pub blood_pressure: String,
}

/// A form that passed validation, with typed values.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedVisit {
    pub date: NaiveDate,
    pub chief_complaint: String,
    pub diagnosis: String,
    pub notes: String,
    pub medications: Vec<String>,
    pub vitals: Vitals,
}

impl VisitForm {
    /// Pre-fill a form from a stored visit.
    pub fn from_visit(visit: &Visit) -> Self {
        Self {
            date: visit.date.format(DATE_FORMAT).to_string(),
            chief_complaint: visit.chief_complaint.clone(),
            diagnosis: visit.diagnosis.clone(),
            notes: visit.notes.clone(),
            medications: visit.medications.clone(),
            temperature: visit
                .vitals
                .temperature
                .map(|t| t.to_string())
                .unwrap_or_default(),
            heart_rate: visit
                .vitals
                .heart_rate
                .map(|h| h.to_string())
                .unwrap_or_default(),
            blood_pressure: visit.vitals.blood_pressure.clone().unwrap_or_default(),
        }
    }

    /// Validate the form, collecting every field error.
    pub fn validate(&self) -> Result<ValidatedVisit, ValidationErrors> {
        let mut errors = Vec::new();
        let mut fail = |field: FormField, message: &str| {
            errors.push(FieldError {
                field,
                message: message.to_string(),
            })
        };

        let date = if self.date.trim().is_empty() {
            fail(FormField::Date, "Date is required");
            None
        } else {
            match NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT) {
                Ok(date) => Some(date),
                Err(_) => {
                    fail(FormField::Date, "Invalid date");
                    None
                }
            }
        };

        if self.chief_complaint.is_empty() {
            fail(FormField::ChiefComplaint, "Chief complaint is required");
        }
        if self.diagnosis.is_empty() {
            fail(FormField::Diagnosis, "Diagnosis is required");
        }
        if self.notes.is_empty() {
            fail(FormField::Notes, "Notes are required");
        }
        if self.medications.is_empty() {
            fail(FormField::Medications, "At least one medication is required");
        }

        let temperature = match parse_optional_number(&self.temperature) {
            Ok(value) => value,
            Err(()) => {
                fail(FormField::Temperature, "Temperature must be a number");
                None
            }
        };
        let heart_rate = match parse_optional_number(&self.heart_rate) {
            Ok(value) => value,
            Err(()) => {
                fail(FormField::HeartRate, "Heart rate must be a number");
                None
            }
        };
        let blood_pressure = Some(self.blood_pressure.trim())
            .filter(|bp| !bp.is_empty())
            .map(str::to_string);

        match date {
            Some(date) if errors.is_empty() => Ok(ValidatedVisit {
                date,
                chief_complaint: self.chief_complaint.clone(),
                diagnosis: self.diagnosis.clone(),
                notes: self.notes.clone(),
                medications: self.medications.clone(),
                vitals: Vitals {
                    temperature,
                    heart_rate,
                    blood_pressure,
                },
            }),
            _ => Err(ValidationErrors(errors)),
        }
    }
}

/// Blank input is "not recorded"; anything else must be a finite number.
fn parse_optional_number(raw: &str) -> Result<Option<f64>, ()> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(()),
    }
}

impl From<ValidatedVisit> for VisitUpdate {
    fn from(visit: ValidatedVisit) -> Self {
        VisitUpdate {
            date: Some(visit.date),
            chief_complaint: Some(visit.chief_complaint),
            diagnosis: Some(visit.diagnosis),
            notes: Some(visit.notes),
            medications: Some(visit.medications),
            vitals: Some(visit.vitals),
        }
    }
}
