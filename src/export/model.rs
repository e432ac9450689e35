// src/export/model.rs

use crate::models::ServiceRecord;
use serde::Serialize;

/// Flat export row for a service record.
#[derive(Serialize, Clone, Debug)]
pub struct RecordExport {
    pub id: String,
    pub title: String,
    pub organization: String,
    pub description: String,
    pub category: String,
    pub start_time: String,
    pub end_time: String,
    pub duration_minutes: u32,
    pub hours: f64,
    pub notes: String,
    pub supervisor: String,
    pub location: String,
}

impl From<&ServiceRecord> for RecordExport {
    fn from(r: &ServiceRecord) -> Self {
        Self {
            id: r.id.to_string(),
            title: r.title.clone(),
            organization: r.organization.clone(),
            description: r.description.clone(),
            category: r.category.label().to_string(),
            start_time: r.start_time.format("%Y-%m-%d %H:%M").to_string(),
            end_time: r
                .end_time
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
            duration_minutes: r.duration_minutes,
            hours: crate::core::stats::minutes_to_hours(u64::from(r.duration_minutes)),
            notes: r.notes.clone().unwrap_or_default(),
            supervisor: r.supervisor.clone().unwrap_or_default(),
            location: r.location.clone().unwrap_or_default(),
        }
    }
}

/// Header for XLSX (CSV gets it from serde).
pub(crate) fn get_headers() -> Vec<&'static str> {
    vec![
        "id",
        "title",
        "organization",
        "description",
        "category",
        "start_time",
        "end_time",
        "duration_minutes",
        "hours",
        "notes",
        "supervisor",
        "location",
    ]
}

pub(crate) fn record_to_row(e: &RecordExport) -> Vec<String> {
    vec![
        e.id.clone(),
        e.title.clone(),
        e.organization.clone(),
        e.description.clone(),
        e.category.clone(),
        e.start_time.clone(),
        e.end_time.clone(),
        e.duration_minutes.to_string(),
        format!("{:.1}", e.hours),
        e.notes.clone(),
        e.supervisor.clone(),
        e.location.clone(),
    ]
}
