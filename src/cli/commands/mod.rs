//! CLI command handlers for `EaglePlan`.
//!
//! Each command is implemented in its own submodule. Commands that work on
//! planner data share [`load_data`] and [`save_data`].

pub mod compare;
pub mod config;
pub mod courses;
pub mod export;
pub mod plan;
pub mod prereqs;
pub mod transcript;

use eagle_plan::config::Config;
use eagle_plan::core::data::PlannerData;
use eagle_plan::{error, info};
use std::path::PathBuf;

/// Planner data together with the file it came from
pub struct LoadedData {
    /// The data set
    pub data: PlannerData,
    /// Source file, `None` for the built-in sample
    pub path: Option<PathBuf>,
}

/// Load the configured data file, or the built-in sample when none is set
///
/// Exits the process when the configured file cannot be loaded.
pub fn load_data(config: &Config) -> LoadedData {
    if config.paths.data_file.is_empty() {
        info!("No data file configured, using built-in sample data");
        return LoadedData {
            data: PlannerData::sample(),
            path: None,
        };
    }

    let path = PathBuf::from(&config.paths.data_file);
    match PlannerData::load(&path) {
        Ok(data) => {
            info!("Loaded planner data from {}", path.display());
            LoadedData {
                data,
                path: Some(path),
            }
        }
        Err(e) => {
            error!("Failed to load planner data from {}: {e}", path.display());
            eprintln!("✗ Failed to load planner data from {}: {e}", path.display());
            std::process::exit(1);
        }
    }
}

/// Write planner data back to its file
///
/// Data loaded from the built-in sample has nowhere to go, so a `--data`
/// path or `data_file` config value is required.
pub fn save_data(loaded: &LoadedData) {
    let Some(path) = &loaded.path else {
        eprintln!("✗ No data file to save to; pass --data FILE or set data_file in config");
        std::process::exit(1);
    };

    if let Err(e) = loaded.data.save(path) {
        error!("Failed to save planner data to {}: {e}", path.display());
        eprintln!("✗ Failed to save planner data to {}: {e}", path.display());
        std::process::exit(1);
    }
    println!("✓ Saved plan to {}", path.display());
}
