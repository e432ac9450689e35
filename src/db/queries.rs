use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::{Category, NewServiceRecord, RecordId, ServiceRecord};
use chrono::{DateTime, Local};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const SELECT_COLUMNS: &str = "id, title, organization, description, start_time, end_time,
     duration, category, is_completed, notes, supervisor, location, created_at, updated_at";

/// Timestamps are stored as RFC 3339 text.
pub fn to_db_time(t: &DateTime<Local>) -> String {
    t.to_rfc3339()
}

fn parse_db_time(idx: usize, raw: &str) -> Result<DateTime<Local>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Local))
        .map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidTime(raw.to_string())),
            )
        })
}

pub fn map_row(row: &Row) -> Result<ServiceRecord> {
    let start_str: String = row.get("start_time")?;
    let start_time = parse_db_time(4, &start_str)?;

    let end_str: Option<String> = row.get("end_time")?;
    let end_time = match end_str {
        Some(s) => Some(parse_db_time(5, &s)?),
        None => None,
    };

    let cat_str: String = row.get("category")?;
    let category = Category::from_db_str(&cat_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            7,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidCategory(cat_str.clone())),
        )
    })?;

    Ok(ServiceRecord {
        id: RecordId::new(row.get::<_, String>("id")?),
        title: row.get("title")?,
        organization: row.get("organization")?,
        description: row.get("description")?,
        start_time,
        end_time,
        duration_minutes: row.get("duration")?,
        category,
        is_completed: row.get::<_, i32>("is_completed")? == 1,
        notes: row.get("notes")?,
        supervisor: row.get("supervisor")?,
        location: row.get("location")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

/// All records of one user, in storage order (no sorting here).
pub fn load_records_for_user(conn: &Connection, user_id: &str) -> AppResult<Vec<ServiceRecord>> {
    let sql = format!(
        "SELECT {SELECT_COLUMNS} FROM service_records
         WHERE user_id = ?1
         ORDER BY rowid ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([user_id], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_record(conn: &Connection, user_id: &str, id: &RecordId) -> AppResult<Option<ServiceRecord>> {
    let sql = format!(
        "SELECT {SELECT_COLUMNS} FROM service_records
         WHERE user_id = ?1 AND id = ?2"
    );
    let rec = conn
        .query_row(&sql, params![user_id, id.as_str()], map_row)
        .optional()?;
    Ok(rec)
}

pub fn insert_record(
    conn: &Connection,
    user_id: &str,
    id: &RecordId,
    rec: &NewServiceRecord,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO service_records (id, user_id, title, organization, description, start_time,
             end_time, duration, category, is_completed, notes, supervisor, location, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        params![
            id.as_str(),
            user_id,
            rec.title,
            rec.organization,
            rec.description,
            to_db_time(&rec.start_time),
            rec.end_time.as_ref().map(to_db_time),
            rec.duration_minutes,
            rec.category.label(),
            if rec.is_completed { 1 } else { 0 },
            rec.notes,
            rec.supervisor,
            rec.location,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

/// Overwrite all user fields of an existing record. Returns the number of rows touched.
pub fn update_record(
    conn: &Connection,
    user_id: &str,
    id: &RecordId,
    rec: &NewServiceRecord,
) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE service_records
         SET title = ?3, organization = ?4, description = ?5, start_time = ?6, end_time = ?7,
             duration = ?8, category = ?9, is_completed = ?10, notes = ?11, supervisor = ?12,
             location = ?13, updated_at = ?14
         WHERE user_id = ?1 AND id = ?2",
        params![
            user_id,
            id.as_str(),
            rec.title,
            rec.organization,
            rec.description,
            to_db_time(&rec.start_time),
            rec.end_time.as_ref().map(to_db_time),
            rec.duration_minutes,
            rec.category.label(),
            if rec.is_completed { 1 } else { 0 },
            rec.notes,
            rec.supervisor,
            rec.location,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(n)
}

/// Delete a record. Zero affected rows is not an error.
pub fn delete_record(conn: &Connection, user_id: &str, id: &RecordId) -> AppResult<usize> {
    let n = conn.execute(
        "DELETE FROM service_records WHERE user_id = ?1 AND id = ?2",
        params![user_id, id.as_str()],
    )?;
    Ok(n)
}

pub fn load_log(pool: &mut DbPool) -> Result<Vec<(i32, String, String, String, String)>> {
    let mut stmt = pool
        .conn
        .prepare_cached("SELECT id, date, operation, target, message FROM log ORDER BY id ASC")?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, i32>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            row.get::<_, String>(4)?,
        ))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }

    Ok(out)
}
