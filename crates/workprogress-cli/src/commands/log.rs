//! Count logging command for CLI.

use chrono::NaiveDate;
use clap::Args;
use workprogress_core::Database;

use super::{parse_day, print_json, today, CommandResult};

#[derive(Args)]
pub struct LogArgs {
    /// Task ID
    pub task_id: i64,
    /// Day to record (default: today)
    #[arg(long, value_parser = parse_day)]
    pub date: Option<NaiveDate>,
    /// Replace the day's count with this value
    #[arg(long, conflicts_with = "add")]
    pub set: Option<i64>,
    /// Add this amount (may be negative; the count never drops below zero)
    #[arg(long, allow_negative_numbers = true)]
    pub add: Option<i64>,
}

pub fn run(args: LogArgs) -> CommandResult {
    let db = Database::open()?;
    let date = args.date.unwrap_or_else(today);

    let count = match args.set {
        Some(value) => db.set_count(date, args.task_id, value)?,
        None => db.increment_count(date, args.task_id, args.add.unwrap_or(1))?,
    };
    print_json(&count)
}
