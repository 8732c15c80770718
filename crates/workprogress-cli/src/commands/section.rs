//! Section management commands for CLI.

use clap::Subcommand;
use workprogress_core::Database;

use super::{print_json, CommandResult};

#[derive(Subcommand)]
pub enum SectionAction {
    /// Create a new section
    Add {
        /// Section name
        name: String,
    },
    /// List all sections
    List,
    /// Rename a section
    Rename {
        /// Section ID
        id: i64,
        /// New name
        name: String,
    },
    /// Delete a section with all of its tasks and counts
    Remove {
        /// Section ID
        id: i64,
    },
}

pub fn run(action: SectionAction) -> CommandResult {
    let db = Database::open()?;

    match action {
        SectionAction::Add { name } => {
            let section = db.add_section(&name)?;
            print_json(&section)?;
        }
        SectionAction::List => {
            print_json(&db.list_sections()?)?;
        }
        SectionAction::Rename { id, name } => {
            print_json(&db.rename_section(id, &name)?)?;
        }
        SectionAction::Remove { id } => {
            db.remove_section(id)?;
            println!("Section removed: {id}");
        }
    }
    Ok(())
}
