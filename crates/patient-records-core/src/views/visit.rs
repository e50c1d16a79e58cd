//! Visit table and visit detail views.

use std::fmt::Display;

use serde::Serialize;

use super::{long_date, MISSING_VALUE, NO_VISITS_RECORDED};
use crate::models::Visit;

/// One row of the visit table.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VisitRow {
    pub id: String,
    pub date: String,
    pub chief_complaint: String,
    pub diagnosis: String,
    pub selected: bool,
}

/// Visits of the selected patient.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VisitTable {
    pub rows: Vec<VisitRow>,
    /// Set when there are no rows
    pub empty_message: Option<&'static str>,
}

impl VisitTable {
    pub fn build<'a>(
        visits: impl Iterator<Item = &'a Visit>,
        selected_visit_id: Option<&str>,
    ) -> Self {
        let rows: Vec<VisitRow> = visits
            .map(|visit| VisitRow {
                id: visit.id.clone(),
                date: long_date(visit.date),
                chief_complaint: visit.chief_complaint.clone(),
                diagnosis: visit.diagnosis.clone(),
                selected: selected_visit_id == Some(visit.id.as_str()),
            })
            .collect();
        let empty_message = rows.is_empty().then_some(NO_VISITS_RECORDED);
        Self {
            rows,
            empty_message,
        }
    }
}

/// Detail panel of the selected visit.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VisitDetail {
    pub id: String,
    pub title: String,
    /// Edit mode; the host shows the form instead of the read-only fields
    pub editing: bool,
    pub date: String,
    pub chief_complaint: String,
    pub diagnosis: String,
    pub notes: String,
    pub medications: Vec<String>,
    pub temperature: String,
    pub heart_rate: String,
    pub blood_pressure: String,
}

impl VisitDetail {
    pub fn build(visit: &Visit, editing: bool) -> Self {
        let date = long_date(visit.date);
        Self {
            id: visit.id.clone(),
            title: format!("Visit Details - {}", date),
            editing,
            date,
            chief_complaint: visit.chief_complaint.clone(),
            diagnosis: visit.diagnosis.clone(),
            notes: visit.notes.clone(),
            medications: visit.medications.clone(),
            temperature: or_missing(visit.vitals.temperature),
            heart_rate: or_missing(visit.vitals.heart_rate),
            blood_pressure: or_missing(
                visit
                    .vitals
                    .blood_pressure
                    .as_deref()
                    .filter(|bp| !bp.is_empty()),
            ),
        }
    }
}

fn or_missing<T: Display>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| MISSING_VALUE.to_string())
}
