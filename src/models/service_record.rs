use super::category::Category;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque record identifier assigned by the document store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A persisted unit of volunteer work.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceRecord {
    pub id: RecordId,
    pub title: String,
    pub organization: String,
    pub description: String,
    pub start_time: DateTime<Local>,
    pub end_time: Option<DateTime<Local>>,
    /// Fixed at write time, never derived from start/end.
    pub duration_minutes: u32,
    pub category: Category,
    pub is_completed: bool,
    pub notes: Option<String>,
    pub supervisor: Option<String>,
    pub location: Option<String>,

    pub created_at: String,         // ⇔ service_records.created_at (RFC 3339)
    pub updated_at: Option<String>, // ⇔ service_records.updated_at
}

impl ServiceRecord {
    /// The user-provided fields, without the store-assigned id and timestamps.
    pub fn fields(&self) -> NewServiceRecord {
        NewServiceRecord {
            title: self.title.clone(),
            organization: self.organization.clone(),
            description: self.description.clone(),
            start_time: self.start_time,
            end_time: self.end_time,
            duration_minutes: self.duration_minutes,
            category: self.category,
            is_completed: self.is_completed,
            notes: self.notes.clone(),
            supervisor: self.supervisor.clone(),
            location: self.location.clone(),
        }
    }
}

/// A record that has not been persisted yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewServiceRecord {
    pub title: String,
    pub organization: String,
    pub description: String,
    pub start_time: DateTime<Local>,
    pub end_time: Option<DateTime<Local>>,
    pub duration_minutes: u32,
    pub category: Category,
    pub is_completed: bool,
    pub notes: Option<String>,
    pub supervisor: Option<String>,
    pub location: Option<String>,
}

impl NewServiceRecord {
    /// Required-field presence and time ordering checks, run before any store call.
    pub fn validate(&self) -> AppResult<()> {
        require("title", &self.title)?;
        require("organization", &self.organization)?;
        require("description", &self.description)?;

        if let Some(end) = self.end_time
            && end < self.start_time
        {
            return Err(AppError::Validation(
                "end time must not be before start time".into(),
            ));
        }

        // in-progress sessions live only in the session clock
        if !self.is_completed || self.end_time.is_none() {
            return Err(AppError::Validation(
                "only completed sessions with an end time can be stored".into(),
            ));
        }

        Ok(())
    }
}

/// Partial update. `None` leaves a field untouched; for the optional text
/// fields `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordPatch {
    pub title: Option<String>,
    pub organization: Option<String>,
    pub description: Option<String>,
    pub start_time: Option<DateTime<Local>>,
    pub end_time: Option<Option<DateTime<Local>>>,
    pub duration_minutes: Option<u32>,
    pub category: Option<Category>,
    pub is_completed: Option<bool>,
    pub notes: Option<Option<String>>,
    pub supervisor: Option<Option<String>>,
    pub location: Option<Option<String>>,
}

impl RecordPatch {
    pub fn is_empty(&self) -> bool {
        *self == RecordPatch::default()
    }

    /// Required fields may be changed but not blanked.
    pub fn validate(&self) -> AppResult<()> {
        if let Some(t) = &self.title {
            require("title", t)?;
        }
        if let Some(o) = &self.organization {
            require("organization", o)?;
        }
        if let Some(d) = &self.description {
            require("description", d)?;
        }
        Ok(())
    }

    /// Apply the patch to a full set of record fields.
    pub fn apply(&self, target: &mut NewServiceRecord) {
        if let Some(v) = &self.title {
            target.title = v.clone();
        }
        if let Some(v) = &self.organization {
            target.organization = v.clone();
        }
        if let Some(v) = &self.description {
            target.description = v.clone();
        }
        if let Some(v) = self.start_time {
            target.start_time = v;
        }
        if let Some(v) = self.end_time {
            target.end_time = v;
        }
        if let Some(v) = self.duration_minutes {
            target.duration_minutes = v;
        }
        if let Some(v) = self.category {
            target.category = v;
        }
        if let Some(v) = self.is_completed {
            target.is_completed = v;
        }
        if let Some(v) = &self.notes {
            target.notes = v.clone();
        }
        if let Some(v) = &self.supervisor {
            target.supervisor = v.clone();
        }
        if let Some(v) = &self.location {
            target.location = v.clone();
        }
    }
}

fn require(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        Err(AppError::Validation(format!("{field} is required")))
    } else {
        Ok(())
    }
}
