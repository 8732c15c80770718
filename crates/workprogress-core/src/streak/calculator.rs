//! Consecutive-day streak computation.
//!
//! The calculator is a pure function over a snapshot of [`ActivityDay`]
//! records. It filters to qualifying days, deduplicates and sorts them
//! most-recent-first, then derives:
//!
//! - **current**: the run ending at `today` or `today - 1`, zero otherwise
//! - **longest**: the longest run anywhere in the history
//!
//! Days dated after `today` are ignored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::day::{validate_all, ActivityDay, RawActivityDay};
use crate::error::ValidationError;

/// Current and longest streak, in days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSummary {
    pub current: u32,
    pub longest: u32,
}

/// Compute the streak summary for `days` relative to `today`.
pub fn compute_streaks(days: &[ActivityDay], today: NaiveDate) -> StreakSummary {
    let mut future = 0usize;
    let qualifying: BTreeSet<NaiveDate> = days
        .iter()
        .filter(|d| d.qualifies)
        .map(|d| d.date)
        .filter(|date| {
            let keep = *date <= today;
            if !keep {
                future += 1;
            }
            keep
        })
        .collect();

    if future > 0 {
        tracing::warn!(%today, count = future, "ignoring future-dated activity days");
    }

    // Most recent first
    let sorted: Vec<NaiveDate> = qualifying.into_iter().rev().collect();
    let Some(&latest) = sorted.first() else {
        return StreakSummary::default();
    };

    let live = (today - latest).num_days() <= 1;

    let mut current: u32 = if live { 1 } else { 0 };
    let mut counting_current = live;
    let mut run: u32 = 1;
    let mut longest: u32 = 1;

    for pair in sorted.windows(2) {
        let consecutive = (pair[0] - pair[1]).num_days() == 1;
        if consecutive {
            run += 1;
            if counting_current {
                current += 1;
            }
        } else {
            run = 1;
            counting_current = false;
        }
        longest = longest.max(run);
    }

    let summary = StreakSummary {
        current,
        longest: longest.max(current),
    };
    tracing::debug!(
        %today,
        days = sorted.len(),
        current = summary.current,
        longest = summary.longest,
        "computed streaks"
    );
    summary
}

/// Validate loosely-typed records, then compute streaks.
///
/// # Errors
/// Returns [`ValidationError::MalformedDate`] for the first record whose
/// date is not a valid `YYYY-MM-DD` calendar date. No record is skipped.
pub fn compute_streaks_from_raw(
    records: &[RawActivityDay],
    today: NaiveDate,
) -> Result<StreakSummary, ValidationError> {
    let days = validate_all(records)?;
    Ok(compute_streaks(&days, today))
}
