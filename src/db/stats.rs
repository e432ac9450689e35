use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use chrono::DateTime;
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) TOTAL RECORDS / USERS
    //
    let count: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM service_records", [], |row| row.get(0))?;
    let users: i64 = pool.conn.query_row(
        "SELECT COUNT(DISTINCT user_id) FROM service_records",
        [],
        |row| row.get(0),
    )?;
    println!(
        "{}• Total records:{} {}{}{}",
        CYAN, RESET, GREEN, count, RESET
    );
    println!("{}• Users:{} {}", CYAN, RESET, users);

    //
    // 3) DATE RANGE
    //
    let first: Option<String> = pool
        .conn
        .query_row("SELECT MIN(start_time) FROM service_records", [], |row| {
            row.get(0)
        })
        .optional()?
        .flatten();

    let last: Option<String> = pool
        .conn
        .query_row("SELECT MAX(start_time) FROM service_records", [], |row| {
            row.get(0)
        })
        .optional()?
        .flatten();

    let fmt_first = first
        .as_deref()
        .map(short_date)
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last
        .as_deref()
        .map(short_date)
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 4) TOTAL HOURS LOGGED
    //
    let minutes: i64 = pool.conn.query_row(
        "SELECT IFNULL(SUM(duration), 0) FROM service_records WHERE is_completed = 1",
        [],
        |row| row.get(0),
    )?;
    println!(
        "{}• Hours logged:{} {:.1}",
        CYAN,
        RESET,
        minutes as f64 / 60.0
    );

    println!();
    Ok(())
}

// Lexicographic MIN/MAX over RFC 3339 text is only approximate across offsets,
// good enough for an overview.
fn short_date(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| raw.to_string())
}
