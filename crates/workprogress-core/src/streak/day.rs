//! Activity day value types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::policy::QualificationPolicy;
use crate::error::ValidationError;

/// Date format used everywhere a day is stored or printed.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A calendar date annotated with whether it counts toward a streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivityDay {
    pub date: NaiveDate,
    pub qualifies: bool,
}

impl ActivityDay {
    pub fn new(date: NaiveDate, qualifies: bool) -> Self {
        Self { date, qualifies }
    }

    /// Parse a `YYYY-MM-DD` date string.
    ///
    /// # Errors
    /// Returns [`ValidationError::MalformedDate`] (with index 0) if the
    /// string is not a valid calendar date.
    pub fn parse(date: &str, qualifies: bool) -> Result<Self, ValidationError> {
        let date =
            parse_date(date).map_err(|value| ValidationError::MalformedDate { index: 0, value })?;
        Ok(Self { date, qualifies })
    }

    /// Build a day from its raw signals under `policy`.
    pub fn from_signals(
        date: NaiveDate,
        max_count: i64,
        mood: Option<&str>,
        policy: QualificationPolicy,
    ) -> Self {
        Self {
            date,
            qualifies: policy.qualifies(max_count, mood),
        }
    }
}

/// Loosely-typed day record as handed over by an external query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawActivityDay {
    pub date: String,
    pub qualifies: bool,
}

impl RawActivityDay {
    pub fn new(date: impl Into<String>, qualifies: bool) -> Self {
        Self {
            date: date.into(),
            qualifies,
        }
    }
}

/// Validate a batch of raw records, failing on the first bad date.
///
/// # Errors
/// Returns [`ValidationError::MalformedDate`] carrying the position of the
/// offending record.
pub fn validate_all(records: &[RawActivityDay]) -> Result<Vec<ActivityDay>, ValidationError> {
    records
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            parse_date(&raw.date)
                .map(|date| ActivityDay::new(date, raw.qualifies))
                .map_err(|value| ValidationError::MalformedDate { index, value })
        })
        .collect()
}

/// Strict `YYYY-MM-DD` parse. Returns the input back on failure.
///
/// chrono accepts unpadded fields like `2025-1-5`; those are rejected
/// here so that stored dates always sort lexicographically.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    let trimmed = s.trim();
    let well_formed = trimmed.len() == 10
        && trimmed
            .bytes()
            .enumerate()
            .all(|(i, b)| if i == 4 || i == 7 { b == b'-' } else { b.is_ascii_digit() });
    if !well_formed {
        return Err(s.to_string());
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| s.to_string())
}
