//! SQLite-based storage for the daily progress log.
//!
//! Provides persistent storage for:
//! - Sections and their tasks
//! - Per-day task counts
//! - Per-day mood markers and notes
//!
//! and derives the [`ActivityDay`] snapshot the streak calculator consumes.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

use super::{data_dir, migrations};
use crate::error::{CoreError, DatabaseError, Result, ValidationError};
use crate::progress::{
    normalize_name, normalize_text, DayCountLine, DayEntry, DaySummary, Section, Task, TaskCount,
};
use crate::streak::{
    compute_streaks, parse_date, validate_all, ActivityDay, QualificationPolicy, RawActivityDay,
    StreakSummary, DATE_FORMAT,
};

/// Largest count a single task may hold for one day.
pub const MAX_COUNT: i64 = 1_000_000_000;

fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse the date column of each fetched row with the same strict rules the
/// streak snapshot uses, reporting the row position on failure.
fn with_dates<T, U>(
    rows: Vec<(String, T)>,
    build: impl Fn(NaiveDate, T) -> U,
) -> Result<Vec<U>, ValidationError> {
    rows.into_iter()
        .enumerate()
        .map(|(index, (raw, rest))| {
            parse_date(&raw)
                .map(|date| build(date, rest))
                .map_err(|value| ValidationError::MalformedDate { index, value })
        })
        .collect()
}

fn parse_timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

fn row_to_section(row: &Row<'_>) -> rusqlite::Result<Section> {
    Ok(Section {
        id: row.get(0)?,
        name: row.get(1)?,
        position: row.get(2)?,
        created_at: parse_timestamp_column(row, 3)?,
    })
}

fn row_to_task(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        section_id: row.get(1)?,
        name: row.get(2)?,
        position: row.get(3)?,
        archived: row.get::<_, i64>(4)? != 0,
    })
}

type CountRow = (String, (i64, i64));
type EntryRow = (String, (Option<String>, Option<String>));

fn row_to_count(row: &Row<'_>) -> rusqlite::Result<CountRow> {
    Ok((row.get(0)?, (row.get(1)?, row.get(2)?)))
}

fn row_to_entry(row: &Row<'_>) -> rusqlite::Result<EntryRow> {
    Ok((row.get(0)?, (row.get(1)?, row.get(2)?)))
}

/// SQLite database for the progress log.
pub struct Database {
    conn: Connection,
}

impl Database {
    #[cfg(test)]
    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `<data_dir>/workprogress.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("workprogress.db");
        Self::open_at(&path)
    }

    /// Open (or create) the database at `path`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "opened progress database");
        Self::init(conn)
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        migrations::migrate(&conn)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(Self { conn })
    }

    // ── Sections ────────────────────────────────────────────────────────

    /// Create a section at the end of the list.
    ///
    /// # Errors
    /// Returns a validation error for a blank name.
    pub fn add_section(&self, name: &str) -> Result<Section> {
        let name = normalize_name("Section", name)?;
        let position: i64 = self.conn.query_row(
            "SELECT COALESCE(MAX(position) + 1, 0) FROM sections",
            [],
            |row| row.get(0),
        )?;
        let created_at = Utc::now();
        self.conn.execute(
            "INSERT INTO sections (name, position, created_at) VALUES (?1, ?2, ?3)",
            params![name, position, created_at.to_rfc3339()],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, name = %name, "section added");
        self.get_section(id)
    }

    /// Fetch a section by id.
    ///
    /// # Errors
    /// Returns [`CoreError::NotFound`] if no such section exists.
    pub fn get_section(&self, id: i64) -> Result<Section> {
        self.conn
            .query_row(
                "SELECT id, name, position, created_at FROM sections WHERE id = ?1",
                [id],
                row_to_section,
            )
            .optional()?
            .ok_or(CoreError::NotFound { kind: "section", id })
    }

    pub fn list_sections(&self) -> Result<Vec<Section>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, position, created_at FROM sections ORDER BY position, id")?;
        let sections = stmt
            .query_map([], row_to_section)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(sections)
    }

    pub fn rename_section(&self, id: i64, name: &str) -> Result<Section> {
        let name = normalize_name("Section", name)?;
        let changed = self
            .conn
            .execute("UPDATE sections SET name = ?1 WHERE id = ?2", params![name, id])?;
        if changed == 0 {
            return Err(CoreError::NotFound { kind: "section", id });
        }
        self.get_section(id)
    }

    /// Delete a section together with its tasks and their counts.
    pub fn remove_section(&self, id: i64) -> Result<()> {
        let changed = self.conn.execute("DELETE FROM sections WHERE id = ?1", [id])?;
        if changed == 0 {
            return Err(CoreError::NotFound { kind: "section", id });
        }
        Ok(())
    }

    // ── Tasks ───────────────────────────────────────────────────────────

    /// Create a task at the end of `section_id`.
    ///
    /// # Errors
    /// Returns [`CoreError::NotFound`] if the section does not exist, or a
    /// validation error for a blank name.
    pub fn add_task(&self, section_id: i64, name: &str) -> Result<Task> {
        let name = normalize_name("Task", name)?;
        self.get_section(section_id)?;
        let position: i64 = self.conn.query_row(
            "SELECT COALESCE(MAX(position) + 1, 0) FROM tasks WHERE section_id = ?1",
            [section_id],
            |row| row.get(0),
        )?;
        self.conn.execute(
            "INSERT INTO tasks (section_id, name, position) VALUES (?1, ?2, ?3)",
            params![section_id, name, position],
        )?;
        self.get_task(self.conn.last_insert_rowid())
    }

    pub fn get_task(&self, id: i64) -> Result<Task> {
        self.conn
            .query_row(
                "SELECT id, section_id, name, position, archived FROM tasks WHERE id = ?1",
                [id],
                row_to_task,
            )
            .optional()?
            .ok_or(CoreError::NotFound { kind: "task", id })
    }

    /// List tasks, optionally restricted to one section.
    pub fn list_tasks(&self, section_id: Option<i64>, include_archived: bool) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(
            "SELECT t.id, t.section_id, t.name, t.position, t.archived
             FROM tasks t JOIN sections s ON s.id = t.section_id
             WHERE (?1 IS NULL OR t.section_id = ?1)
               AND (?2 OR t.archived = 0)
             ORDER BY s.position, s.id, t.position, t.id",
        )?;
        let tasks = stmt
            .query_map(params![section_id, include_archived], row_to_task)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tasks)
    }

    /// Hide a task from listings while keeping its history.
    pub fn archive_task(&self, id: i64) -> Result<Task> {
        let changed = self
            .conn
            .execute("UPDATE tasks SET archived = 1 WHERE id = ?1", [id])?;
        if changed == 0 {
            return Err(CoreError::NotFound { kind: "task", id });
        }
        self.get_task(id)
    }

    /// Delete a task and all of its counts.
    pub fn remove_task(&self, id: i64) -> Result<()> {
        let changed = self.conn.execute("DELETE FROM tasks WHERE id = ?1", [id])?;
        if changed == 0 {
            return Err(CoreError::NotFound { kind: "task", id });
        }
        Ok(())
    }

    // ── Counts ──────────────────────────────────────────────────────────

    /// Set the count for a task on `date`.
    ///
    /// # Errors
    /// Rejects counts outside `0..=MAX_COUNT` and unknown tasks.
    pub fn set_count(&self, date: NaiveDate, task_id: i64, count: i64) -> Result<TaskCount> {
        if !(0..=MAX_COUNT).contains(&count) {
            return Err(ValidationError::InvalidValue {
                field: "count".into(),
                message: format!("must be between 0 and {MAX_COUNT}, got {count}"),
            }
            .into());
        }
        self.get_task(task_id)?;
        self.conn.execute(
            "INSERT INTO task_counts (date, task_id, count) VALUES (?1, ?2, ?3)
             ON CONFLICT(date, task_id) DO UPDATE SET count = excluded.count",
            params![date_key(date), task_id, count],
        )?;
        Ok(TaskCount { date, task_id, count })
    }

    /// Add `delta` (possibly negative) to the count, never going below zero.
    ///
    /// # Errors
    /// Fails like [`Database::set_count`] when the result exceeds [`MAX_COUNT`].
    pub fn increment_count(&self, date: NaiveDate, task_id: i64, delta: i64) -> Result<TaskCount> {
        let existing = self.count_for(date, task_id)?;
        let next = existing.saturating_add(delta).max(0);
        self.set_count(date, task_id, next)
    }

    fn count_for(&self, date: NaiveDate, task_id: i64) -> Result<i64> {
        let count = self
            .conn
            .query_row(
                "SELECT count FROM task_counts WHERE date = ?1 AND task_id = ?2",
                params![date_key(date), task_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(count.unwrap_or(0))
    }

    pub fn counts_on(&self, date: NaiveDate) -> Result<Vec<TaskCount>> {
        self.counts_between(date, date)
    }

    /// Counts in the inclusive range `from..=to`, ordered by date then task.
    ///
    /// # Errors
    /// Returns a validation error if a stored date is malformed.
    pub fn counts_between(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<TaskCount>> {
        let mut stmt = self.conn.prepare(
            "SELECT date, task_id, count FROM task_counts
             WHERE date >= ?1 AND date <= ?2
             ORDER BY date, task_id",
        )?;
        let rows = stmt
            .query_map(params![date_key(from), date_key(to)], row_to_count)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        let counts = with_dates(rows, |date, (task_id, count)| TaskCount {
            date,
            task_id,
            count,
        })?;
        Ok(counts)
    }

    // ── Day entries ─────────────────────────────────────────────────────

    /// Set or clear (with `None` or a blank string) the mood for `date`.
    pub fn set_mood(&self, date: NaiveDate, mood: Option<&str>) -> Result<DayEntry> {
        self.conn.execute(
            "INSERT INTO day_entries (date, mood) VALUES (?1, ?2)
             ON CONFLICT(date) DO UPDATE SET mood = excluded.mood",
            params![date_key(date), normalize_text(mood)],
        )?;
        self.day_entry(date)
    }

    /// Set or clear (with `None` or a blank string) the notes for `date`.
    pub fn set_notes(&self, date: NaiveDate, notes: Option<&str>) -> Result<DayEntry> {
        self.conn.execute(
            "INSERT INTO day_entries (date, notes) VALUES (?1, ?2)
             ON CONFLICT(date) DO UPDATE SET notes = excluded.notes",
            params![date_key(date), normalize_text(notes)],
        )?;
        self.day_entry(date)
    }

    /// Mood and notes for `date`; empty if nothing was recorded.
    pub fn day_entry(&self, date: NaiveDate) -> Result<DayEntry> {
        let fields: Option<(Option<String>, Option<String>)> = self
            .conn
            .query_row(
                "SELECT mood, notes FROM day_entries WHERE date = ?1",
                [date_key(date)],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        let (mood, notes) = fields.unwrap_or_default();
        Ok(DayEntry { date, mood, notes })
    }

    /// Day entries in the inclusive range `from..=to`, ordered by date.
    ///
    /// # Errors
    /// Returns a validation error if a stored date is malformed.
    pub fn entries_between(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<DayEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT date, mood, notes FROM day_entries
             WHERE date >= ?1 AND date <= ?2
             ORDER BY date",
        )?;
        let rows = stmt
            .query_map(params![date_key(from), date_key(to)], row_to_entry)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        let entries = with_dates(rows, |date, (mood, notes)| DayEntry { date, mood, notes })?;
        Ok(entries)
    }

    // ── Derived views ───────────────────────────────────────────────────

    /// Everything recorded for `date`, with names resolved.
    pub fn day_summary(&self, date: NaiveDate, policy: QualificationPolicy) -> Result<DaySummary> {
        let mut stmt = self.conn.prepare(
            "SELECT c.task_id, t.name, s.name, c.count
             FROM task_counts c
             JOIN tasks t ON t.id = c.task_id
             JOIN sections s ON s.id = t.section_id
             WHERE c.date = ?1
             ORDER BY s.position, s.id, t.position, t.id",
        )?;
        let counts = stmt
            .query_map([date_key(date)], |row| {
                Ok(DayCountLine {
                    task_id: row.get(0)?,
                    task_name: row.get(1)?,
                    section_name: row.get(2)?,
                    count: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let entry = self.day_entry(date)?;
        let total = counts.iter().fold(0i64, |acc, c| acc.saturating_add(c.count));
        let max_count = counts.iter().map(|c| c.count).max().unwrap_or(0);
        let qualifies = policy.qualifies(max_count, entry.mood.as_deref());

        Ok(DaySummary {
            date,
            counts,
            total,
            mood: entry.mood,
            notes: entry.notes,
            qualifies,
        })
    }

    /// Build the per-day snapshot for the streak calculator.
    ///
    /// Each stored date is joined with its highest task count and its mood
    /// marker, then classified under `policy`.
    ///
    /// # Errors
    /// Returns a validation error if a stored date is malformed.
    pub fn activity_days(&self, policy: QualificationPolicy) -> Result<Vec<ActivityDay>> {
        let mut stmt = self.conn.prepare(
            "SELECT date, MAX(max_count), MAX(mood) FROM (
                SELECT date, MAX(count) AS max_count, NULL AS mood
                  FROM task_counts GROUP BY date
                UNION ALL
                SELECT date, 0 AS max_count, mood FROM day_entries
             )
             GROUP BY date
             ORDER BY date",
        )?;
        let raw = stmt
            .query_map([], |row| {
                let date: String = row.get(0)?;
                let max_count: Option<i64> = row.get(1)?;
                let mood: Option<String> = row.get(2)?;
                Ok(RawActivityDay::new(
                    date,
                    policy.qualifies(max_count.unwrap_or(0), mood.as_deref()),
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(validate_all(&raw)?)
    }

    /// Current and longest streak as of `today`.
    pub fn streaks(&self, policy: QualificationPolicy, today: NaiveDate) -> Result<StreakSummary> {
        let days = self.activity_days(policy)?;
        Ok(compute_streaks(&days, today))
    }
}
