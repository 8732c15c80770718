//! Daily activity streaks.
//!
//! A day *qualifies* when its signals satisfy the configured
//! [`QualificationPolicy`]. Streaks are counted over qualifying calendar
//! days only; see [`compute_streaks`] for the exact rules.

mod calculator;
mod day;
mod policy;

pub use calculator::{compute_streaks, compute_streaks_from_raw, StreakSummary};
pub use day::{parse_date, validate_all, ActivityDay, RawActivityDay, DATE_FORMAT};
pub use policy::QualificationPolicy;
