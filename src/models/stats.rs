use serde::Serialize;

/// Aggregate statistics derived from a snapshot. Hours are rounded to one decimal.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ServiceStats {
    pub total_hours: f64,
    pub this_week_hours: f64,
    pub this_month_hours: f64,
    pub completed_sessions: usize,
}
