mod fake_store;

use chrono::Weekday;
use fake_store::{at, record};
use servicelog::core::stats::{
    compute_stats, compute_stats_default, minutes_to_hours, month_start, week_start,
};
use servicelog::models::ServiceStats;

#[test]
fn test_empty_snapshot_gives_zeroes() {
    let stats = compute_stats_default(&[], at(2025, 6, 18, 12, 0));
    assert_eq!(stats, ServiceStats::default());
    assert_eq!(stats.total_hours, 0.0);
    assert_eq!(stats.completed_sessions, 0);
}

#[test]
fn test_week_and_month_split() {
    // Wednesday; the Sunday-based week starts on June 15
    let now = at(2025, 6, 18, 12, 0);
    let records = vec![
        record("in-week", at(2025, 6, 16, 10, 0), 30),
        record("in-month", at(2025, 6, 3, 10, 0), 90),
    ];

    let stats = compute_stats_default(&records, now);
    assert_eq!(stats.this_week_hours, 0.5);
    assert_eq!(stats.this_month_hours, 2.0);
    assert_eq!(stats.total_hours, 2.0);
    assert_eq!(stats.completed_sessions, 2);
}

#[test]
fn test_week_start_boundaries() {
    let now = at(2025, 6, 18, 12, 0);
    assert_eq!(week_start(now, Weekday::Sun), at(2025, 6, 15, 0, 0));
    assert_eq!(week_start(now, Weekday::Mon), at(2025, 6, 16, 0, 0));

    // on the first day itself the week starts that same midnight
    let sunday = at(2025, 6, 15, 8, 30);
    assert_eq!(week_start(sunday, Weekday::Sun), at(2025, 6, 15, 0, 0));
    assert_eq!(week_start(sunday, Weekday::Mon), at(2025, 6, 9, 0, 0));

    assert_eq!(month_start(now), at(2025, 6, 1, 0, 0));
}

#[test]
fn test_monday_week_start_excludes_sunday() {
    let now = at(2025, 6, 18, 12, 0);
    let records = vec![record("sunday", at(2025, 6, 15, 10, 0), 60)];

    assert_eq!(compute_stats(&records, now, Weekday::Sun).this_week_hours, 1.0);
    assert_eq!(compute_stats(&records, now, Weekday::Mon).this_week_hours, 0.0);
}

#[test]
fn test_record_at_exact_boundary_is_included() {
    let now = at(2025, 6, 18, 12, 0);
    let records = vec![record("midnight", at(2025, 6, 15, 0, 0), 45)];
    let stats = compute_stats_default(&records, now);
    assert_eq!(stats.this_week_hours, 0.8);
}

#[test]
fn test_incomplete_records_are_ignored() {
    let now = at(2025, 6, 18, 12, 0);
    let mut open = record("open", at(2025, 6, 17, 10, 0), 120);
    open.is_completed = false;
    let records = vec![open, record("done", at(2025, 6, 17, 14, 0), 60)];

    let stats = compute_stats_default(&records, now);
    assert_eq!(stats.total_hours, 1.0);
    assert_eq!(stats.completed_sessions, 1);
}

#[test]
fn test_stats_are_pure_and_consistent() {
    let now = at(2025, 6, 18, 12, 0);
    let records = vec![
        record("a", at(2025, 6, 17, 10, 0), 25),
        record("b", at(2025, 6, 10, 10, 0), 50),
        record("c", at(2025, 5, 20, 10, 0), 100),
        record("d", at(2024, 12, 1, 10, 0), 7),
    ];

    let first = compute_stats_default(&records, now);
    let second = compute_stats_default(&records, now);
    assert_eq!(first, second);

    // the week of June 15 does not cross a month boundary
    assert!(first.this_week_hours <= first.this_month_hours);
    assert!(first.this_month_hours <= first.total_hours);
}

#[test]
fn test_records_inside_current_week_count_everywhere() {
    // week of June 15 lies entirely within June
    let now = at(2025, 6, 18, 12, 0);
    let records = vec![
        record("sun", at(2025, 6, 15, 9, 0), 40),
        record("tue", at(2025, 6, 17, 18, 0), 80),
    ];

    let stats = compute_stats_default(&records, now);
    assert_eq!(stats.this_week_hours, 2.0);
    assert_eq!(stats.this_week_hours, stats.this_month_hours);
    assert_eq!(stats.this_week_hours, stats.total_hours);
}

#[test]
fn test_week_straddling_month_start_counts_previous_month_days() {
    // Wednesday July 2; the Sunday week began on June 29
    let now = at(2025, 7, 2, 12, 0);
    let records = vec![record("june", at(2025, 6, 30, 10, 0), 60)];

    let stats = compute_stats_default(&records, now);
    assert_eq!(stats.this_week_hours, 1.0);
    assert_eq!(stats.this_month_hours, 0.0);
    assert_eq!(stats.total_hours, 1.0);
}

#[test]
fn test_hours_rounding() {
    assert_eq!(minutes_to_hours(0), 0.0);
    assert_eq!(minutes_to_hours(30), 0.5);
    // 0.25h rounds half away from zero
    assert_eq!(minutes_to_hours(15), 0.3);
    assert_eq!(minutes_to_hours(100), 1.7);
    assert_eq!(minutes_to_hours(47), 0.8);
}
