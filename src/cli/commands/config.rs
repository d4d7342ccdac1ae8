//! Config command handler

use crate::args::ConfigSubcommand;
use eagle_plan::config::{Config, CONFIG_KEYS};
use std::fmt::Write as _;
use std::io::{self, Write};

/// Dispatch config subcommands
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) {
    match subcommand {
        None => handle_config_get(config, None),
        Some(ConfigSubcommand::Get { key }) => handle_config_get(config, key),
        Some(ConfigSubcommand::Set { key, value }) => handle_config_set(config, &key, &value),
        Some(ConfigSubcommand::Unset { key }) => handle_config_unset(config, defaults, &key),
        Some(ConfigSubcommand::Reset) => handle_config_reset(),
    }
}

/// Render one section with a description per key
///
/// The planner section also states the semester load its comparison
/// assumptions add up to. Returns `None` for an unknown section.
fn format_section(config: &Config, section: &str) -> Option<String> {
    let keys: Vec<_> = Config::section_keys(section).collect();
    if keys.is_empty() {
        return None;
    }

    let width = keys.iter().map(|k| k.name.len()).max().unwrap_or(0);
    let mut out = format!("[{section}]\n");
    for key in keys {
        let value = config.get(key.name).unwrap_or_default();
        let shown = if value.is_empty() {
            "(unset)".to_string()
        } else {
            value
        };
        let _ = writeln!(out, "  {:<width$} = {shown:<12} # {}", key.name, key.about);
    }

    if section == "planner" {
        let settings = config.comparison_settings();
        let _ = writeln!(
            out,
            "  comparisons assume {} credits per semester",
            settings
                .credits_per_course
                .saturating_mul(settings.courses_per_semester)
        );
    }
    Some(out)
}

fn known_keys() -> String {
    CONFIG_KEYS
        .iter()
        .map(|k| k.name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Handle the config get subcommand
///
/// KEY may name a single key or a whole section such as `planner`.
pub fn handle_config_get(config: &Config, key: Option<String>) {
    let Some(k) = key else {
        println!("\n=== Configuration ===\n");
        println!("# {}\n", Config::get_config_file_path().display());
        for section in Config::sections() {
            if let Some(text) = format_section(config, section) {
                println!("{text}");
            }
        }
        return;
    };

    if let Some(value) = config.get(&k) {
        println!("{value}");
    } else if let Some(text) = format_section(config, &k) {
        print!("{text}");
    } else {
        eprintln!("✗ Unknown config key: '{k}'");
        eprintln!("  Known keys: {}", known_keys());
        std::process::exit(1);
    }
}

/// Handle the config set subcommand
pub fn handle_config_set(config: &mut Config, key: &str, value: &str) {
    let previous = config.get(key);
    if let Err(e) = config.set(key, value) {
        eprintln!("✗ {e}");
        if previous.is_none() {
            eprintln!("  Known keys: {}", known_keys());
        }
        std::process::exit(1);
    }

    if let Err(e) = config.save() {
        eprintln!("✗ Failed to save config: {e}");
        std::process::exit(1);
    }

    match previous {
        Some(old) if old != value => println!("✓ Set {key}: {old} → {value}"),
        _ => println!("✓ Set {key} = {value}"),
    }
}

/// Handle the config unset subcommand
pub fn handle_config_unset(config: &mut Config, defaults: &Config, key: &str) {
    if let Err(e) = config.unset(key, defaults) {
        eprintln!("✗ {e}");
        std::process::exit(1);
    }

    if let Err(e) = config.save() {
        eprintln!("✗ Failed to save config: {e}");
        std::process::exit(1);
    }

    let restored = config.get(key).unwrap_or_default();
    println!("✓ Reset {key} to default ({restored})");
}

/// Handle the config reset subcommand
pub fn handle_config_reset() {
    let path = Config::get_config_file_path();
    if !path.exists() {
        println!("✓ Config is already at defaults");
        return;
    }

    print!("Remove {} and return to defaults? (y/n): ", path.display());
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();

    if matches!(response.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
        if let Err(e) = Config::reset() {
            eprintln!("✗ Failed to remove config file: {e}");
            std::process::exit(1);
        }
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planner_section_listing() {
        let mut config = Config::from_defaults();
        config.planner.credits_per_course = 4;
        config.planner.courses_per_semester = 5;

        let text = format_section(&config, "planner").unwrap();
        assert!(text.starts_with("[planner]\n"));
        assert!(text.contains("max_credits"));
        assert!(text.contains("# credit cap for new semesters"));
        assert!(text.contains("comparisons assume 20 credits per semester"));
        assert!(!text.contains("level"));
    }

    #[test]
    fn test_empty_value_shown_as_unset() {
        let mut config = Config::from_defaults();
        config.paths.data_file.clear();

        let text = format_section(&config, "paths").unwrap();
        let line = text.lines().find(|l| l.contains("data_file")).unwrap();
        assert!(line.contains("(unset)"));
    }

    #[test]
    fn test_unknown_section() {
        assert!(format_section(&Config::from_defaults(), "database").is_none());
        assert!(known_keys().contains("courses_per_semester"));
    }
}
