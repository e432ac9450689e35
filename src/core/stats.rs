//! Statistics over a snapshot. Pure: same records and same `now` give the same result.

use crate::models::{ServiceRecord, ServiceStats};
use crate::utils::date::local_midnight;
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, Weekday};

/// Local midnight of the most recent `first_day` on or before `now`.
pub fn week_start(now: DateTime<Local>, first_day: Weekday) -> DateTime<Local> {
    let today = now.date_naive();
    let back = (7 + today.weekday().num_days_from_monday() - first_day.num_days_from_monday()) % 7;
    local_midnight(today - Duration::days(i64::from(back)))
}

/// Local midnight of the first day of `now`'s month.
pub fn month_start(now: DateTime<Local>) -> DateTime<Local> {
    let today = now.date_naive();
    let first = NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap_or(today);
    local_midnight(first)
}

/// Minutes → hours, one decimal, half away from zero.
pub fn minutes_to_hours(minutes: u64) -> f64 {
    (minutes as f64 / 60.0 * 10.0).round() / 10.0
}

pub fn compute_stats(
    records: &[ServiceRecord],
    now: DateTime<Local>,
    first_day: Weekday,
) -> ServiceStats {
    let week = week_start(now, first_day);
    let month = month_start(now);

    let completed: Vec<&ServiceRecord> = records.iter().filter(|r| r.is_completed).collect();

    let sum = |from: Option<DateTime<Local>>| -> u64 {
        completed
            .iter()
            .filter(|r| from.is_none_or(|f| r.start_time >= f))
            .map(|r| u64::from(r.duration_minutes))
            .sum()
    };

    ServiceStats {
        total_hours: minutes_to_hours(sum(None)),
        this_week_hours: minutes_to_hours(sum(Some(week))),
        this_month_hours: minutes_to_hours(sum(Some(month))),
        completed_sessions: completed.len(),
    }
}

/// Same as [`compute_stats`] with weeks starting on Sunday.
pub fn compute_stats_default(records: &[ServiceRecord], now: DateTime<Local>) -> ServiceStats {
    compute_stats(records, now, Weekday::Sun)
}
