//! Time utilities: parsing HH:MM and durations, formatting minutes and hours.

use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;
use regex::Regex;
use std::sync::OnceLock;

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

fn duration_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:(\d+)\s*h)?\s*(?:(\d+)\s*m(?:in)?)?$").expect("valid duration regex")
    })
}

/// Parse a duration in minutes: "90", "1h30m", "2h", "45m", "45min".
pub fn parse_duration(input: &str) -> AppResult<u32> {
    let s = input.trim().to_lowercase();
    let invalid = || AppError::InvalidDuration(input.to_string());

    if s.is_empty() {
        return Err(invalid());
    }
    if let Ok(m) = s.parse::<u32>() {
        return Ok(m);
    }

    let caps = duration_re().captures(&s).ok_or_else(invalid)?;
    let hours = caps.get(1).map(|m| m.as_str().parse::<u32>());
    let mins = caps.get(2).map(|m| m.as_str().parse::<u32>());
    if hours.is_none() && mins.is_none() {
        return Err(invalid());
    }

    let h = hours.transpose().map_err(|_| invalid())?.unwrap_or(0);
    let m = mins.transpose().map_err(|_| invalid())?.unwrap_or(0);
    h.checked_mul(60)
        .and_then(|x| x.checked_add(m))
        .ok_or_else(invalid)
}

/// "2h 5m", "2h" or "45m".
pub fn format_duration(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours == 0 {
        format!("{mins}m")
    } else if mins == 0 {
        format!("{hours}h")
    } else {
        format!("{hours}h {mins}m")
    }
}

/// Format an elapsed running time as HH:MM:SS.
pub fn format_clock(seconds: i64) -> String {
    let s = seconds.max(0);
    format!("{:02}:{:02}:{:02}", s / 3600, (s % 3600) / 60, s % 60)
}
