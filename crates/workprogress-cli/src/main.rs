use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "workprogress", version, about = "Daily work progress tracker")]
struct Cli {
    /// Log debug output to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Section management
    Section {
        #[command(subcommand)]
        action: commands::section::SectionAction,
    },
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Record a count for a task
    Log(commands::log::LogArgs),
    /// Set or clear the mood for a day
    Mood(commands::day::MoodArgs),
    /// Set or clear the notes for a day
    Note(commands::day::NoteArgs),
    /// Show everything recorded for a day
    Day(commands::day::DayArgs),
    /// Current and longest streak
    Streak(commands::streak::StreakArgs),
    /// Progress statistics over a date range
    Stats(commands::stats::StatsArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("WORKPROGRESS_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Section { action } => commands::section::run(action),
        Commands::Task { action } => commands::task::run(action),
        Commands::Log(args) => commands::log::run(args),
        Commands::Mood(args) => commands::day::run_mood(args),
        Commands::Note(args) => commands::day::run_note(args),
        Commands::Day(args) => commands::day::run_day(args),
        Commands::Streak(args) => commands::streak::run(args),
        Commands::Stats(args) => commands::stats::run(args),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "workprogress", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
