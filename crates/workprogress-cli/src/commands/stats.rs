use chrono::{Duration, NaiveDate};
use clap::Args;
use workprogress_core::{Config, ConfigError, Database, ProgressStatsAnalyzer};

use super::{parse_day, print_json, today, CommandResult};

#[derive(Args)]
pub struct StatsArgs {
    /// First day of the range (default: `display.default_range_days` before --to)
    #[arg(long, value_parser = parse_day)]
    pub from: Option<NaiveDate>,
    /// Last day of the range, inclusive (default: today)
    #[arg(long, value_parser = parse_day)]
    pub to: Option<NaiveDate>,
}

pub fn run(args: StatsArgs) -> CommandResult {
    let config = Config::load()?;
    let db = Database::open()?;

    let to = args.to.unwrap_or_else(today);
    let from = match args.from {
        Some(from) => from,
        None => {
            let span = i64::from(config.display.default_range_days.max(1)) - 1;
            to.checked_sub_signed(Duration::days(span))
                .ok_or_else(|| ConfigError::InvalidValue {
                    key: "display.default_range_days".into(),
                    message: format!("range of {span} days before {to} is out of bounds"),
                })?
        }
    };

    let analyzer =
        ProgressStatsAnalyzer::new(config.streak.policy, config.display.week_starts_on_monday);
    print_json(&analyzer.analyze_database(&db, from, to)?)
}
