use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if the `service_records` table exists.
fn records_table_exists(conn: &Connection) -> Result<bool> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master WHERE type='table' AND name='service_records'",
    )?;
    let exists: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Check if a column exists on `service_records`.
fn records_has_column(conn: &Connection, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare("PRAGMA table_info('service_records')")?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create the `service_records` table with the initial schema.
fn create_records_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS service_records (
            id            TEXT PRIMARY KEY,
            user_id       TEXT NOT NULL,
            title         TEXT NOT NULL,
            organization  TEXT NOT NULL,
            description   TEXT NOT NULL,
            start_time    TEXT NOT NULL,
            end_time      TEXT,
            duration      INTEGER NOT NULL DEFAULT 0 CHECK(duration >= 0),
            category      TEXT NOT NULL DEFAULT 'Community Service' CHECK(category IN (
                'Community Service', 'Education', 'Environment', 'Senior Care',
                'Healthcare', 'Animal Care', 'Other'
            )),
            is_completed  INTEGER NOT NULL DEFAULT 0,
            notes         TEXT,
            supervisor    TEXT,
            location      TEXT,
            created_at    TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_records_user ON service_records(user_id);
        CREATE INDEX IF NOT EXISTS idx_records_user_start ON service_records(user_id, start_time);
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

fn migrate_add_updated_at_column(conn: &Connection) -> Result<()> {
    let version = "20250610_0002_add_updated_at";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    if !records_has_column(conn, "updated_at")? {
        conn.execute("ALTER TABLE service_records ADD COLUMN updated_at TEXT;", [])?;
    }

    mark_applied(conn, version, "Added updated_at to service_records")
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    if !records_table_exists(conn)? {
        create_records_table(conn)?;
        mark_applied(
            conn,
            "20250601_0001_create_service_records",
            "Created service_records table",
        )?;
    }

    migrate_add_updated_at_column(conn)?;

    Ok(())
}
