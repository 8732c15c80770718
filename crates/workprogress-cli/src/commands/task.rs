//! Task management commands for CLI.

use clap::Subcommand;
use workprogress_core::Database;

use super::{print_json, CommandResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task in a section
    Add {
        /// Section ID
        section_id: i64,
        /// Task name
        name: String,
    },
    /// List tasks
    List {
        /// Filter by section ID
        #[arg(long)]
        section: Option<i64>,
        /// Include archived tasks
        #[arg(long)]
        all: bool,
    },
    /// Hide a task while keeping its history
    Archive {
        /// Task ID
        id: i64,
    },
    /// Delete a task and its history
    Remove {
        /// Task ID
        id: i64,
    },
}

pub fn run(action: TaskAction) -> CommandResult {
    let db = Database::open()?;

    match action {
        TaskAction::Add { section_id, name } => {
            print_json(&db.add_task(section_id, &name)?)?;
        }
        TaskAction::List { section, all } => {
            print_json(&db.list_tasks(section, all)?)?;
        }
        TaskAction::Archive { id } => {
            print_json(&db.archive_task(id)?)?;
        }
        TaskAction::Remove { id } => {
            db.remove_task(id)?;
            println!("Task removed: {id}");
        }
    }
    Ok(())
}
