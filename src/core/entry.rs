//! Manual entry and edit forms.
//!
//! Both forms take a date, a start time and a duration; the end time is
//! always start + duration. The duration is kept as entered, which is what
//! allows it to differ from the distance between stored timestamps later on.

use crate::errors::{AppError, AppResult};
use crate::models::{Category, NewServiceRecord, RecordPatch, ServiceRecord};
use crate::utils::date::{local_datetime, parse_date};
use crate::utils::time::{parse_duration, parse_time};
use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeDelta};

pub const DEFAULT_START: &str = "09:00";
pub const DEFAULT_DURATION_MINUTES: u32 = 60;

/// Raw manual-entry input as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct EntryForm {
    pub title: String,
    pub organization: String,
    pub description: String,
    pub date: String,
    pub start_time: Option<String>,
    pub duration: Option<String>,
    pub category: Option<Category>,
    pub notes: Option<String>,
    pub supervisor: Option<String>,
    pub location: Option<String>,
}

impl EntryForm {
    pub fn to_record(&self) -> AppResult<NewServiceRecord> {
        let date = parse_date(&self.date).ok_or_else(|| AppError::InvalidDate(self.date.clone()))?;
        let time = parse_form_time(self.start_time.as_deref().unwrap_or(DEFAULT_START))?;
        let duration = match &self.duration {
            Some(d) => parse_duration(d)?,
            None => DEFAULT_DURATION_MINUTES,
        };

        let (start, end) = span(date, time, duration)?;

        Ok(NewServiceRecord {
            title: self.title.trim().to_string(),
            organization: self.organization.trim().to_string(),
            description: self.description.trim().to_string(),
            start_time: start,
            end_time: Some(end),
            duration_minutes: duration,
            category: self.category.unwrap_or_default(),
            is_completed: true,
            notes: non_blank(self.notes.as_deref()),
            supervisor: non_blank(self.supervisor.as_deref()),
            location: non_blank(self.location.as_deref()),
        })
    }
}

/// Raw edit input. `None` keeps the current value; for notes, supervisor and
/// location an empty string clears it.
#[derive(Debug, Clone, Default)]
pub struct EditForm {
    pub title: Option<String>,
    pub organization: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub duration: Option<String>,
    pub category: Option<Category>,
    pub notes: Option<String>,
    pub supervisor: Option<String>,
    pub location: Option<String>,
}

impl EditForm {
    /// Build the patch against the record being edited. Start, end and
    /// duration are recomputed together whenever one of date, start time or
    /// duration changes.
    pub fn to_patch(&self, current: &ServiceRecord) -> AppResult<RecordPatch> {
        let mut patch = RecordPatch {
            title: self.title.as_ref().map(|s| s.trim().to_string()),
            organization: self.organization.as_ref().map(|s| s.trim().to_string()),
            description: self.description.as_ref().map(|s| s.trim().to_string()),
            category: self.category,
            notes: self.notes.as_deref().map(|s| non_blank(Some(s))),
            supervisor: self.supervisor.as_deref().map(|s| non_blank(Some(s))),
            location: self.location.as_deref().map(|s| non_blank(Some(s))),
            ..RecordPatch::default()
        };

        if self.date.is_some() || self.start_time.is_some() || self.duration.is_some() {
            let date = match &self.date {
                Some(d) => parse_date(d).ok_or_else(|| AppError::InvalidDate(d.clone()))?,
                None => current.start_time.date_naive(),
            };
            let time = match &self.start_time {
                Some(t) => parse_form_time(t)?,
                None => current.start_time.time(),
            };
            let duration = match &self.duration {
                Some(d) => parse_duration(d)?,
                None => current.duration_minutes,
            };

            let (start, end) = span(date, time, duration)?;
            patch.start_time = Some(start);
            patch.end_time = Some(Some(end));
            patch.duration_minutes = Some(duration);
        }

        Ok(patch)
    }
}

fn parse_form_time(s: &str) -> AppResult<NaiveTime> {
    parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))
}

fn span(
    date: NaiveDate,
    time: NaiveTime,
    duration: u32,
) -> AppResult<(DateTime<Local>, DateTime<Local>)> {
    let start = local_datetime(date, time)?;
    let end = start + TimeDelta::minutes(i64::from(duration));
    Ok((start, end))
}

fn non_blank(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}
