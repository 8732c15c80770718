//! Day entry commands for CLI: mood, notes and the day summary.

use chrono::NaiveDate;
use clap::Args;
use workprogress_core::{Config, Database};

use super::{parse_day, print_json, today, CommandResult};

#[derive(Args)]
pub struct MoodArgs {
    /// Mood marker, usually a single emoji
    #[arg(required_unless_present = "clear")]
    pub mood: Option<String>,
    /// Remove the mood for the day
    #[arg(long, conflicts_with = "mood")]
    pub clear: bool,
    /// Day to update (default: today)
    #[arg(long, value_parser = parse_day)]
    pub date: Option<NaiveDate>,
}

#[derive(Args)]
pub struct NoteArgs {
    /// Note text
    #[arg(required_unless_present = "clear")]
    pub text: Option<String>,
    /// Remove the notes for the day
    #[arg(long, conflicts_with = "text")]
    pub clear: bool,
    /// Day to update (default: today)
    #[arg(long, value_parser = parse_day)]
    pub date: Option<NaiveDate>,
}

#[derive(Args)]
pub struct DayArgs {
    /// Day to show (default: today)
    #[arg(long, value_parser = parse_day)]
    pub date: Option<NaiveDate>,
}

pub fn run_mood(args: MoodArgs) -> CommandResult {
    let db = Database::open()?;
    let date = args.date.unwrap_or_else(today);
    let mood = if args.clear { None } else { args.mood.as_deref() };
    print_json(&db.set_mood(date, mood)?)
}

pub fn run_note(args: NoteArgs) -> CommandResult {
    let db = Database::open()?;
    let date = args.date.unwrap_or_else(today);
    let text = if args.clear { None } else { args.text.as_deref() };
    print_json(&db.set_notes(date, text)?)
}

pub fn run_day(args: DayArgs) -> CommandResult {
    let config = Config::load()?;
    let db = Database::open()?;
    let date = args.date.unwrap_or_else(today);
    print_json(&db.day_summary(date, config.streak.policy)?)
}
