//! Configuration module for `EaglePlan`

use crate::core::compare::ComparisonSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

/// Variable expanded to the config directory in path values
const DIR_VARIABLE: &str = "$EAGLE_PLAN";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Planning rules
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Credit cap for newly created semesters
    #[serde(default)]
    pub max_credits: u32,
    /// Credits assumed per major course when comparing majors
    #[serde(default)]
    pub credits_per_course: u32,
    /// Major courses assumed per semester when comparing majors
    #[serde(default)]
    pub courses_per_semester: u32,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Planner data file; empty means the built-in sample data
    #[serde(default)]
    pub data_file: String,
    /// Directory for exported plans
    #[serde(default)]
    pub export_dir: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Planner settings
    #[serde(default)]
    pub planner: PlannerConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
}

/// A key accepted by `get`, `set` and `unset`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigKey {
    /// Section holding the key
    pub section: &'static str,
    /// Key name
    pub name: &'static str,
    /// One-line description shown in listings
    pub about: &'static str,
}

/// Every configuration key in listing order
pub const CONFIG_KEYS: &[ConfigKey] = &[
    ConfigKey {
        section: "logging",
        name: "level",
        about: "error, warn, info or debug",
    },
    ConfigKey {
        section: "logging",
        name: "file",
        about: "append log lines here instead of the terminal",
    },
    ConfigKey {
        section: "logging",
        name: "verbose",
        about: "print progress details",
    },
    ConfigKey {
        section: "planner",
        name: "max_credits",
        about: "credit cap for new semesters",
    },
    ConfigKey {
        section: "planner",
        name: "credits_per_course",
        about: "credits assumed per course when comparing majors",
    },
    ConfigKey {
        section: "planner",
        name: "courses_per_semester",
        about: "courses assumed per semester when comparing majors",
    },
    ConfigKey {
        section: "paths",
        name: "data_file",
        about: "planner data file, empty for the sample data",
    },
    ConfigKey {
        section: "paths",
        name: "export_dir",
        about: "directory for exported plans",
    },
];

/// CLI-provided overrides; `None` leaves the loaded value untouched
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Log level
    pub level: Option<String>,
    /// Log file path
    pub file: Option<String>,
    /// Verbose flag
    pub verbose: Option<bool>,
    /// Semester credit cap
    pub max_credits: Option<u32>,
    /// Planner data file
    pub data_file: Option<String>,
    /// Export directory
    pub export_dir: Option<String>,
}

impl Config {
    /// Get the `$EAGLE_PLAN` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/eagleplan`
    /// - macOS: `~/Library/Application Support/eagleplan`
    /// - Windows: `%APPDATA%\eagleplan`
    #[must_use]
    pub fn get_eagleplan_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("eagleplan")
    }

    /// Merge missing fields from defaults into this config
    /// Returns true if any fields were added
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        // Empty strings and zero limits count as missing
        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }

        if self.planner.max_credits == 0 && defaults.planner.max_credits != 0 {
            self.planner.max_credits = defaults.planner.max_credits;
            changed = true;
        }
        if self.planner.credits_per_course == 0 && defaults.planner.credits_per_course != 0 {
            self.planner.credits_per_course = defaults.planner.credits_per_course;
            changed = true;
        }
        if self.planner.courses_per_semester == 0 && defaults.planner.courses_per_semester != 0 {
            self.planner.courses_per_semester = defaults.planner.courses_per_semester;
            changed = true;
        }

        if self.paths.data_file.is_empty() && !defaults.paths.data_file.is_empty() {
            self.paths.data_file.clone_from(&defaults.paths.data_file);
            changed = true;
        }
        if self.paths.export_dir.is_empty() && !defaults.paths.export_dir.is_empty() {
            self.paths.export_dir.clone_from(&defaults.paths.export_dir);
            changed = true;
        }

        changed
    }

    /// Get the user config file path
    ///
    /// return config.toml for release
    ///        dconfig.toml for debug
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        #[cfg(debug_assertions)]
        {
            Self::get_eagleplan_dir().join("dconfig.toml")
        }
        #[cfg(not(debug_assertions))]
        {
            Self::get_eagleplan_dir().join("config.toml")
        }
    }

    /// Expand `$EAGLE_PLAN` variable in a string
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_eagleplan_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// # Errors
    /// Returns an error if the TOML cannot be parsed
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.data_file = Self::expand_variables(&config.paths.data_file);
        config.paths.export_dir = Self::expand_variables(&config.paths.export_dir);

        Ok(config)
    }

    /// Initialize config from defaults (TOML string)
    ///
    /// # Panics
    /// Panics if the compiled-in defaults TOML cannot be parsed
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load config from the user config file, creating it from defaults on first run
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_file_path())
    }

    /// Load config from a specific file, creating it from defaults if missing
    ///
    /// An unreadable or unparsable file falls back to defaults without being overwritten.
    #[must_use]
    pub fn load_from(config_file: &Path) -> Self {
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save_to(config_file);
                    }
                    return config;
                }
            }
        } else {
            // First run: persist the defaults
            let _ = defaults.save_to(config_file);
            return defaults;
        }

        defaults
    }

    /// Save config to the user config file
    ///
    /// # Errors
    /// Returns an error if the config cannot be saved
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::get_config_file_path())
    }

    /// Save config to a specific file
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written
    pub fn save_to(&self, config_file: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(config_file, toml_str)?;
        Ok(())
    }

    /// Apply CLI overrides in place
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(max_credits) = overrides.max_credits {
            self.planner.max_credits = max_credits;
        }
        if let Some(data_file) = &overrides.data_file {
            self.paths.data_file.clone_from(data_file);
        }
        if let Some(export_dir) = &overrides.export_dir {
            self.paths.export_dir.clone_from(export_dir);
        }
    }

    /// Major comparison assumptions from the planner section
    #[must_use]
    pub fn comparison_settings(&self) -> ComparisonSettings {
        let fallback = ComparisonSettings::default();
        ComparisonSettings {
            credits_per_course: if self.planner.credits_per_course == 0 {
                fallback.credits_per_course
            } else {
                self.planner.credits_per_course
            },
            courses_per_semester: if self.planner.courses_per_semester == 0 {
                fallback.courses_per_semester
            } else {
                self.planner.courses_per_semester
            },
        }
    }

    /// Section names in listing order
    #[must_use]
    pub fn sections() -> Vec<&'static str> {
        let mut sections: Vec<&'static str> = CONFIG_KEYS.iter().map(|k| k.section).collect();
        sections.dedup();
        sections
    }

    /// Keys belonging to a section, empty for an unknown section
    pub fn section_keys(section: &str) -> impl Iterator<Item = &'static ConfigKey> + '_ {
        CONFIG_KEYS.iter().filter(move |k| k.section == section)
    }

    /// Get a configuration value by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "max_credits" => Some(self.planner.max_credits.to_string()),
            "credits_per_course" => Some(self.planner.credits_per_course.to_string()),
            "courses_per_semester" => Some(self.planner.courses_per_semester.to_string()),
            "data_file" => Some(self.paths.data_file.clone()),
            "export_dir" => Some(self.paths.export_dir.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value is invalid
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "max_credits" => self.planner.max_credits = parse_positive(key, value)?,
            "credits_per_course" => self.planner.credits_per_course = parse_positive(key, value)?,
            "courses_per_semester" => {
                self.planner.courses_per_semester = parse_positive(key, value)?;
            }
            "data_file" => self.paths.data_file = value.to_string(),
            "export_dir" => self.paths.export_dir = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// # Errors
    /// Returns an error if the key is unknown
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "max_credits" => self.planner.max_credits = defaults.planner.max_credits,
            "credits_per_course" => {
                self.planner.credits_per_course = defaults.planner.credits_per_course;
            }
            "courses_per_semester" => {
                self.planner.courses_per_semester = defaults.planner.courses_per_semester;
            }
            "data_file" => self.paths.data_file.clone_from(&defaults.paths.data_file),
            "export_dir" => self.paths.export_dir.clone_from(&defaults.paths.export_dir),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// # Errors
    /// Returns an error if the config file cannot be deleted
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

fn parse_positive(key: &str, value: &str) -> Result<u32, String> {
    value
        .parse::<u32>()
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| format!("Invalid positive integer for '{key}': '{value}'"))
}
