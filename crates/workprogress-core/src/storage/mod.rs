mod config;
pub mod database;
pub mod migrations;

pub use config::{Config, DisplayConfig, StreakConfig, MAX_RANGE_DAYS};
pub use database::Database;

use std::path::PathBuf;

/// Returns the data directory, creating it if needed.
///
/// Resolution order:
/// 1. `WORKPROGRESS_DATA_DIR` if set
/// 2. `~/.config/workprogress-dev/` when `WORKPROGRESS_ENV=dev`
/// 3. `~/.config/workprogress/`
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let dir = match std::env::var_os("WORKPROGRESS_DATA_DIR") {
        Some(explicit) if !explicit.is_empty() => PathBuf::from(explicit),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("WORKPROGRESS_ENV")
                .unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("workprogress-dev")
            } else {
                base_dir.join("workprogress")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
