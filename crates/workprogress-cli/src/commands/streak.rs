use chrono::NaiveDate;
use clap::Args;
use workprogress_core::{Config, Database, QualificationPolicy};

use super::{parse_day, print_json, today, CommandResult};

#[derive(Args)]
pub struct StreakArgs {
    /// Reference date (default: today)
    #[arg(long, value_parser = parse_day)]
    pub today: Option<NaiveDate>,
    /// Override the configured policy for this run (count_or_mood or count_only)
    #[arg(long)]
    pub policy: Option<QualificationPolicy>,
}

pub fn run(args: StreakArgs) -> CommandResult {
    let config = Config::load()?;
    let db = Database::open()?;
    let policy = args.policy.unwrap_or(config.streak.policy);
    let summary = db.streaks(policy, args.today.unwrap_or_else(today))?;
    print_json(&summary)
}
