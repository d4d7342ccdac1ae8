//! CLI argument definitions for `EaglePlan`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use eagle_plan::config::ConfigOverrides;
use eagle_plan::core::export::ExportFormat;
use eagle_plan::core::models::Season;
use eagle_plan::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `logger::Level`
/// for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

/// Term season argument
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum SeasonArg {
    /// Spring term
    Spring,
    /// Summer term
    Summer,
    /// Fall term
    Fall,
}

impl From<SeasonArg> for Season {
    fn from(arg: SeasonArg) -> Self {
        match arg {
            SeasonArg::Spring => Self::Spring,
            SeasonArg::Summer => Self::Summer,
            SeasonArg::Fall => Self::Fall,
        }
    }
}

/// Export format argument
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum ExportFormatArg {
    /// Comma-separated values
    Csv,
    /// iCalendar
    Ical,
    /// Standalone HTML page
    Html,
}

impl From<ExportFormatArg> for ExportFormat {
    fn from(arg: ExportFormatArg) -> Self {
        match arg {
            ExportFormatArg::Csv => Self::Csv,
            ExportFormatArg::Ical => Self::Ical,
            ExportFormatArg::Html => Self::Html,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `max_credits`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum PlanSubcommand {
    /// Show every semester with its courses and the available pool.
    Show,
    /// Report overloaded semesters and prerequisites scheduled too late.
    Check,
    /// Append an empty semester using the configured credit cap.
    AddSemester {
        /// Term season
        #[arg(value_enum)]
        season: SeasonArg,
        /// Calendar year
        year: u32,
    },
    /// Place a course from the available pool into a semester.
    Place {
        /// Pool course id or code
        #[arg(value_name = "COURSE")]
        course: String,
        /// Target semester id
        #[arg(value_name = "SEMESTER")]
        semester: String,
    },
    /// Move a placed course to another semester.
    Move {
        /// Placement id
        #[arg(value_name = "COURSE")]
        course: String,
        /// Target semester id
        #[arg(value_name = "SEMESTER")]
        semester: String,
    },
    /// Toggle the lock on a placed course.
    Lock {
        /// Placement id
        #[arg(value_name = "COURSE")]
        course: String,
    },
    /// Remove a placed course from its semester.
    Remove {
        /// Placement id
        #[arg(value_name = "COURSE")]
        course: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// List the course catalog.
    Courses {
        /// Show the status implied by prerequisite completion and flag mismatches
        #[arg(long)]
        derive_status: bool,
    },
    /// Print the prerequisite chain of a course.
    Prereqs {
        /// Course code (e.g., "CSCE 3110")
        #[arg(value_name = "CODE")]
        code: String,
        /// Drop repeated codes from the chain
        #[arg(long)]
        dedup: bool,
        /// Also list courses that depend on this one
        #[arg(long)]
        dependents: bool,
    },
    /// Inspect and edit the semester plan.
    Plan {
        #[command(subcommand)]
        subcommand: PlanSubcommand,
        /// Write the changed plan back to the data file
        #[arg(long)]
        save: bool,
    },
    /// Compare the course lists of two majors.
    Compare {
        /// Primary major id or name
        #[arg(value_name = "MAJOR")]
        major: String,
        /// Major to compare against
        #[arg(value_name = "OTHER")]
        other: String,
    },
    /// Import a transcript file.
    Transcript {
        /// Transcript path (CSV; PDF is recognized but not parsed)
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Mark completed and in-progress courses in the catalog and save
        #[arg(long)]
        apply: bool,
    },
    /// Export the semester plan.
    Export {
        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: ExportFormatArg,
        /// Output file path (defaults to `<export_dir>/plan.<ext>`)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Print to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "eagleplan",
    about = "EaglePlan degree planning command-line interface",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Planner data file (TOML). Uses the built-in sample when neither this nor config is set.
    #[arg(long = "data", value_name = "FILE")]
    pub data: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override the credit cap for new semesters
    #[arg(long = "max-credits", value_name = "CREDITS")]
    pub max_credits: Option<u32>,

    /// Override config export directory
    #[arg(long = "export-dir", value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// `None` means the loaded config value is kept.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            max_credits: self.max_credits,
            data_file: self.data.as_ref().map(|p| p.to_string_lossy().to_string()),
            export_dir: self
                .export_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
        }
    }
}
