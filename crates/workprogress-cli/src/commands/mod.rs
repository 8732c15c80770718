pub mod config;
pub mod day;
pub mod log;
pub mod section;
pub mod stats;
pub mod streak;
pub mod task;

use chrono::{Local, NaiveDate};
use workprogress_core::streak::parse_date;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// clap value parser for `YYYY-MM-DD` arguments.
pub fn parse_day(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).map_err(|value| format!("invalid date '{value}', expected YYYY-MM-DD"))
}

/// Today's calendar date in the local time zone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn print_json<T: serde::Serialize>(value: &T) -> CommandResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
