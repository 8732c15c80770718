//! # Work Progress Core Library
//!
//! This library provides the core logic for the Work Progress daily tracker.
//! Every operation is available through the `workprogress` CLI binary, which
//! is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Streaks**: A pure calculator over a snapshot of activity days; it owns
//!   no state and performs no I/O
//! - **Storage**: SQLite-based progress log and TOML-based configuration
//! - **Stats**: Range aggregation over counts and day entries
//!
//! ## Key Components
//!
//! - [`compute_streaks`]: Current and longest streak for a snapshot
//! - [`ActivityDay`]: Validated day record consumed by the calculator
//! - [`Database`]: Sections, tasks, counts, moods and notes
//! - [`Config`]: Application configuration management

pub mod error;
pub mod progress;
pub mod stats;
pub mod storage;
pub mod streak;

pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use progress::{DayCountLine, DayEntry, DaySummary, Section, Task, TaskCount};
pub use stats::{ProgressStats, ProgressStatsAnalyzer};
pub use storage::{Config, Database};
pub use streak::{
    compute_streaks, compute_streaks_from_raw, ActivityDay, QualificationPolicy, RawActivityDay,
    StreakSummary,
};
