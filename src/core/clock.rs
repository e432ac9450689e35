//! Session clock: a two-state (idle / active) machine for a live session.

use crate::core::record_store::RecordStore;
use crate::errors::{AppError, AppResult};
use crate::models::{ActiveSession, Category, ClockState, NewServiceRecord, RecordId};
use chrono::{DateTime, Local, TimeDelta};

pub const CLOCK_DESCRIPTION: &str = "Service session completed via clock in/out";
pub const CLOCK_NOTES: &str = "Completed via clock out";

/// Result of a successful clock-out.
#[derive(Debug, Clone)]
pub struct CompletedSession {
    pub id: RecordId,
    pub record: NewServiceRecord,
}

#[derive(Debug, Default)]
pub struct SessionClock {
    state: ClockState,
}

impl SessionClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ClockState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Running time of the active session, if any.
    pub fn elapsed(&self, now: DateTime<Local>) -> Option<TimeDelta> {
        self.state
            .current_session()
            .map(|s| (now - s.start_time).max(TimeDelta::zero()))
    }

    pub fn clock_in(
        &mut self,
        title: &str,
        organization: &str,
        category: Category,
    ) -> AppResult<&ActiveSession> {
        self.clock_in_at(title, organization, category, Local::now())
    }

    /// Clock in at an explicit instant. Only valid while idle.
    pub fn clock_in_at(
        &mut self,
        title: &str,
        organization: &str,
        category: Category,
        now: DateTime<Local>,
    ) -> AppResult<&ActiveSession> {
        if let ClockState::Active(s) = &self.state {
            return Err(AppError::InvalidState(format!(
                "already clocked in to '{}' since {}",
                s.title,
                s.start_time.format("%Y-%m-%d %H:%M")
            )));
        }
        if title.trim().is_empty() {
            return Err(AppError::Validation("title is required".into()));
        }
        if organization.trim().is_empty() {
            return Err(AppError::Validation("organization is required".into()));
        }

        self.state = ClockState::Active(ActiveSession {
            title: title.to_string(),
            organization: organization.to_string(),
            category,
            start_time: now,
        });

        self.state
            .current_session()
            .ok_or_else(|| AppError::Other("clock failed to activate".into()))
    }

    pub fn clock_out(
        &mut self,
        store: &RecordStore,
        notes: Option<&str>,
    ) -> AppResult<CompletedSession> {
        self.clock_out_at(store, notes, Local::now())
    }

    /// Finish the active session and persist it.
    ///
    /// The clock is back to idle afterwards whatever the outcome: if the
    /// write fails the session is dropped and the error returned.
    pub fn clock_out_at(
        &mut self,
        store: &RecordStore,
        notes: Option<&str>,
        now: DateTime<Local>,
    ) -> AppResult<CompletedSession> {
        let session = match std::mem::take(&mut self.state) {
            ClockState::Active(s) => s,
            ClockState::Idle => {
                return Err(AppError::InvalidState("not clocked in".into()));
            }
        };

        let record = finish(session, notes, now);
        let id = store.create(&record)?;
        Ok(CompletedSession { id, record })
    }
}

fn finish(session: ActiveSession, notes: Option<&str>, now: DateTime<Local>) -> NewServiceRecord {
    let end = now.max(session.start_time);
    let elapsed_ms = (end - session.start_time).num_milliseconds();
    let duration_minutes = (elapsed_ms as f64 / 60_000.0).round() as u32;

    let notes = notes
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(CLOCK_NOTES)
        .to_string();

    NewServiceRecord {
        title: session.title,
        organization: session.organization,
        description: CLOCK_DESCRIPTION.to_string(),
        start_time: session.start_time,
        end_time: Some(end),
        duration_minutes,
        category: session.category,
        is_completed: true,
        notes: Some(notes),
        supervisor: None,
        location: None,
    }
}
