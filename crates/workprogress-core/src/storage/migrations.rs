//! Database schema migrations for workprogress.
//!
//! Migrations are versioned and applied automatically when opening the database.
//! The `schema_version` table tracks the current migration version.

use rusqlite::{Connection, Result as SqliteResult};

/// Current schema version.
pub const CURRENT_VERSION: i32 = 2;

/// Apply all pending migrations to bring the database to the current schema version.
///
/// # Errors
/// Returns an error if migration fails.
pub fn migrate(conn: &Connection) -> SqliteResult<()> {
    create_schema_version_table(conn)?;

    let current_version = get_schema_version(conn);

    if current_version < 1 {
        migrate_v1(conn)?;
    }
    if current_version < 2 {
        migrate_v2(conn)?;
    }

    Ok(())
}

fn create_schema_version_table(conn: &Connection) -> SqliteResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        );",
    )
}

/// Get the current schema version from the database.
///
/// Returns 0 if no version is set (initial database).
fn get_schema_version(conn: &Connection) -> i32 {
    conn.query_row("SELECT version FROM schema_version", [], |row| {
        row.get::<_, i32>(0)
    })
    .unwrap_or_else(|e| {
        if !matches!(e, rusqlite::Error::QueryReturnedNoRows) {
            tracing::warn!(error = %e, "failed to read schema_version");
        }
        0
    })
}

fn set_schema_version(conn: &Connection, version: i32) -> SqliteResult<()> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
    tracing::debug!(version, "schema version updated");
    Ok(())
}

/// Migration v1: sections, tasks, per-day counts and day entries.
fn migrate_v1(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS sections (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            position    INTEGER NOT NULL DEFAULT 0,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS tasks (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            section_id  INTEGER NOT NULL REFERENCES sections(id) ON DELETE CASCADE,
            name        TEXT NOT NULL,
            position    INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS task_counts (
            date        TEXT NOT NULL,
            task_id     INTEGER NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
            count       INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (date, task_id)
        );

        CREATE TABLE IF NOT EXISTS day_entries (
            date        TEXT PRIMARY KEY,
            mood        TEXT,
            notes       TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_tasks_section ON tasks(section_id);
        CREATE INDEX IF NOT EXISTS idx_task_counts_task ON task_counts(task_id);",
    )?;
    set_schema_version(&tx, 1)?;
    tx.commit()
}

/// Migration v2: archived flag on tasks.
fn migrate_v2(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch("ALTER TABLE tasks ADD COLUMN archived INTEGER NOT NULL DEFAULT 0;")?;
    set_schema_version(&tx, 2)?;
    tx.commit()
}
