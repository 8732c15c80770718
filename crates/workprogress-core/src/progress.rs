//! Work progress data model.
//!
//! Tasks are grouped into sections. Each task carries a non-negative count
//! per day; each day may additionally carry a mood marker and free-form notes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A named group of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: i64,
    pub name: String,
    pub position: i64,
    pub created_at: DateTime<Utc>,
}

/// A counter-type item tracked per day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub section_id: i64,
    pub name: String,
    pub position: i64,
    /// Archived tasks keep their history but are hidden from listings
    pub archived: bool,
}

/// Count recorded for one task on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCount {
    pub date: NaiveDate,
    pub task_id: i64,
    pub count: i64,
}

/// Mood and notes for a single day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    pub date: NaiveDate,
    pub mood: Option<String>,
    pub notes: Option<String>,
}

/// One line of a [`DaySummary`]: a task's count with its names resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCountLine {
    pub task_id: i64,
    pub task_name: String,
    pub section_name: String,
    pub count: i64,
}

/// Everything recorded for a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub counts: Vec<DayCountLine>,
    pub total: i64,
    pub mood: Option<String>,
    pub notes: Option<String>,
    pub qualifies: bool,
}

/// Trim a user-supplied name and reject it if nothing is left.
pub(crate) fn normalize_name(kind: &str, name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName(kind.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Blank strings clear a text field.
pub(crate) fn normalize_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
