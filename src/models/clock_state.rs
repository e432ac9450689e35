use super::category::Category;
use chrono::{DateTime, Local};
use serde::Serialize;

/// The in-progress, not yet persisted session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveSession {
    pub title: String,
    pub organization: String,
    pub category: Category,
    pub start_time: DateTime<Local>,
}

/// Session clock state. A current session exists exactly when the clock is active.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub enum ClockState {
    #[default]
    Idle,
    Active(ActiveSession),
}

impl ClockState {
    pub fn is_active(&self) -> bool {
        matches!(self, ClockState::Active(_))
    }

    pub fn current_session(&self) -> Option<&ActiveSession> {
        match self {
            ClockState::Idle => None,
            ClockState::Active(s) => Some(s),
        }
    }
}
