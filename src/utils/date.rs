use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Attach the local time zone to a wall-clock date/time.
/// Ambiguous instants (DST fold) resolve to the earlier one.
pub fn local_datetime(date: NaiveDate, time: NaiveTime) -> AppResult<DateTime<Local>> {
    let naive = NaiveDateTime::new(date, time);
    match Local.from_local_datetime(&naive) {
        LocalResult::Single(t) => Ok(t),
        LocalResult::Ambiguous(earlier, _) => Ok(earlier),
        LocalResult::None => Err(AppError::InvalidTime(format!(
            "{} does not exist in the local time zone",
            naive.format("%Y-%m-%d %H:%M")
        ))),
    }
}

/// Local midnight of `date`; if midnight falls in a DST gap, the UTC reading is used.
pub fn local_midnight(date: NaiveDate) -> DateTime<Local> {
    let naive = date.and_time(NaiveTime::MIN);
    match Local.from_local_datetime(&naive) {
        LocalResult::Single(t) => t,
        LocalResult::Ambiguous(earlier, _) => earlier,
        LocalResult::None => Local.from_utc_datetime(&naive),
    }
}

pub fn format_date_time(t: &DateTime<Local>) -> String {
    t.format("%Y-%m-%d %H:%M").to_string()
}
