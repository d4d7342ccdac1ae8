//! Integration tests for configuration management

use eagle_plan::config::{Config, ConfigOverrides, CONFIG_KEYS};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a temporary config directory
fn setup_temp_config() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("config.toml");
    (temp_dir, config_file)
}

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(
        !config.logging.level.is_empty(),
        "Default log level should not be empty"
    );
    assert_eq!(config.planner.max_credits, 18);
    assert_eq!(config.planner.credits_per_course, 3);
    assert_eq!(config.planner.courses_per_semester, 4);
    assert!(
        !config.paths.export_dir.is_empty(),
        "Default export_dir should not be empty"
    );
    assert!(
        config.paths.data_file.is_empty(),
        "No data file by default, so the sample data is used"
    );
}

#[test]
fn test_config_from_toml_basic() {
    let toml_str = r#"
[logging]
level = "info"
file = "/tmp/test.log"
verbose = true

[planner]
max_credits = 21
credits_per_course = 4
courses_per_semester = 5

[paths]
data_file = "./plan.toml"
export_dir = "./out"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/test.log");
    assert!(config.logging.verbose);
    assert_eq!(config.planner.max_credits, 21);
    assert_eq!(config.planner.credits_per_course, 4);
    assert_eq!(config.planner.courses_per_semester, 5);
    assert_eq!(config.paths.data_file, "./plan.toml");
    assert_eq!(config.paths.export_dir, "./out");
}

#[test]
fn test_config_from_toml_partial() {
    let toml_str = r#"
[logging]
level = "error"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse partial TOML");

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "");
    assert!(!config.logging.verbose);
    assert_eq!(config.planner.max_credits, 0);
    assert_eq!(config.paths.export_dir, "");
}

#[test]
fn test_config_variable_expansion() {
    let toml_str = r#"
[logging]
file = "$EAGLE_PLAN/test.log"

[paths]
export_dir = "$EAGLE_PLAN/exports"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML with variables");

    assert!(config.logging.file.contains("eagleplan"));
    assert!(!config.logging.file.contains("$EAGLE_PLAN"));
    assert!(config.paths.export_dir.ends_with("exports"));
    assert!(!config.paths.export_dir.contains("$EAGLE_PLAN"));
}

#[test]
fn test_config_get_set() {
    let mut config = Config::from_defaults();

    assert!(config.get("level").is_some());

    config.set("level", "debug").expect("Failed to set level");
    assert_eq!(config.get("level").unwrap(), "debug");

    config
        .set("verbose", "true")
        .expect("Failed to set verbose");
    assert!(config.logging.verbose);

    config
        .set("max_credits", "15")
        .expect("Failed to set max_credits");
    assert_eq!(config.get("max_credits").unwrap(), "15");

    assert!(config.get("unknown_key").is_none());
    assert!(config.set("unknown_key", "value").is_err());
}

#[test]
fn test_config_set_rejects_bad_numbers() {
    let mut config = Config::from_defaults();

    assert!(config.set("max_credits", "0").is_err());
    assert!(config.set("max_credits", "-3").is_err());
    assert!(config.set("courses_per_semester", "four").is_err());
    assert!(config.set("verbose", "maybe").is_err());
    assert_eq!(config.planner.max_credits, 18);
}

#[test]
fn test_config_unset() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    config.set("level", "error").expect("Failed to set level");
    config
        .set("export_dir", "/elsewhere")
        .expect("Failed to set export_dir");

    config
        .unset("level", &defaults)
        .expect("Failed to unset level");
    config
        .unset("export_dir", &defaults)
        .expect("Failed to unset export_dir");

    assert_eq!(config.logging.level, defaults.logging.level);
    assert_eq!(config.paths.export_dir, defaults.paths.export_dir);
    assert!(config.unset("nope", &defaults).is_err());
}

#[test]
fn test_config_save_and_load() {
    let (_temp_dir, config_file) = setup_temp_config();

    let mut config = Config::from_defaults();
    config.set("level", "info").expect("Failed to set level");
    config
        .set("max_credits", "12")
        .expect("Failed to set max_credits");
    config.save_to(&config_file).expect("Failed to save config");

    let loaded = Config::load_from(&config_file);
    assert_eq!(loaded.logging.level, "info");
    assert_eq!(loaded.planner.max_credits, 12);
}

#[test]
fn test_load_from_creates_file_on_first_run() {
    let (_temp_dir, config_file) = setup_temp_config();
    assert!(!config_file.exists());

    let config = Config::load_from(&config_file);

    assert!(config_file.exists());
    assert_eq!(config.planner.max_credits, 18);
}

#[test]
fn test_load_from_fills_missing_fields() {
    let (_temp_dir, config_file) = setup_temp_config();
    fs::write(&config_file, "[logging]\nlevel = \"error\"\n").expect("Failed to write config");

    let config = Config::load_from(&config_file);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.planner.max_credits, 18);

    let content = fs::read_to_string(&config_file).expect("Failed to read config");
    assert!(content.contains("max_credits = 18"));
}

#[test]
fn test_load_from_unparsable_falls_back_to_defaults() {
    let (_temp_dir, config_file) = setup_temp_config();
    fs::write(&config_file, "this is = = not toml").expect("Failed to write config");

    let config = Config::load_from(&config_file);

    assert_eq!(config.planner.max_credits, 18);
    let content = fs::read_to_string(&config_file).expect("Failed to read config");
    assert_eq!(content, "this is = = not toml");
}

#[test]
fn test_config_overrides_apply() {
    let mut config = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("error".to_string()),
        file: Some("/custom/path.log".to_string()),
        verbose: Some(true),
        max_credits: Some(15),
        data_file: Some("/plans/me.toml".to_string()),
        export_dir: Some("./custom_exports".to_string()),
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/custom/path.log");
    assert!(config.logging.verbose);
    assert_eq!(config.planner.max_credits, 15);
    assert_eq!(config.paths.data_file, "/plans/me.toml");
    assert_eq!(config.paths.export_dir, "./custom_exports");
}

#[test]
fn test_config_overrides_partial() {
    let mut config = Config::from_defaults();
    let before = config.paths.export_dir.clone();

    let overrides = ConfigOverrides {
        level: Some("debug".to_string()),
        ..ConfigOverrides::default()
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.paths.export_dir, before);
    assert_eq!(config.planner.max_credits, 18);
}

#[test]
fn test_comparison_settings_from_config() {
    let mut config = Config::from_defaults();
    config
        .set("credits_per_course", "4")
        .expect("Failed to set credits_per_course");

    let settings = config.comparison_settings();
    assert_eq!(settings.credits_per_course, 4);
    assert_eq!(settings.courses_per_semester, 4);

    config.planner.courses_per_semester = 0;
    assert_eq!(config.comparison_settings().courses_per_semester, 4);
}

#[test]
fn test_config_display_format() {
    let display_str = format!("{}", Config::from_defaults());

    assert!(display_str.contains("[logging]"));
    assert!(display_str.contains("[planner]"));
    assert!(display_str.contains("[paths]"));
    assert!(display_str.contains("max_credits = 18"));
    assert!(display_str.contains("export_dir"));
}

#[test]
fn test_merge_defaults_adds_missing_fields() {
    let toml_str = r#"
[logging]
level = "error"
file = ""
verbose = false

[planner]
max_credits = 0

[paths]
export_dir = ""
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse minimal config");
    let defaults = Config::from_defaults();

    let changed = config.merge_defaults(&defaults);

    assert!(
        changed,
        "merge_defaults should return true when fields are added"
    );
    assert_eq!(config.planner.max_credits, defaults.planner.max_credits);
    assert_eq!(config.paths.export_dir, defaults.paths.export_dir);
}

#[test]
fn test_merge_defaults_preserves_existing() {
    let toml_str = r#"
[logging]
level = "error"
file = "/my/custom/path.log"

[planner]
max_credits = 12
credits_per_course = 3
courses_per_semester = 4

[paths]
export_dir = "/my/exports"
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse config");
    let defaults = Config::from_defaults();

    config.merge_defaults(&defaults);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/my/custom/path.log");
    assert_eq!(config.planner.max_credits, 12);
    assert_eq!(config.paths.export_dir, "/my/exports");
}

#[test]
fn test_get_eagleplan_dir() {
    let dir = Config::get_eagleplan_dir();
    assert!(dir.to_string_lossy().contains("eagleplan"));
}

#[test]
fn test_get_config_file_path() {
    let path = Config::get_config_file_path();
    let path_str = path.to_string_lossy();
    assert!(path_str.ends_with("config.toml") || path_str.ends_with("dconfig.toml"));
}

#[test]
fn test_every_listed_key_is_readable_and_resettable() {
    let defaults = Config::from_defaults();
    let mut config = defaults.clone();

    for key in CONFIG_KEYS {
        assert!(config.get(key.name).is_some(), "{} not readable", key.name);
        config
            .unset(key.name, &defaults)
            .unwrap_or_else(|e| panic!("{} not resettable: {e}", key.name));
    }

    assert_eq!(Config::sections(), ["logging", "planner", "paths"]);
    let planner: Vec<&str> = Config::section_keys("planner").map(|k| k.name).collect();
    assert_eq!(
        planner,
        ["max_credits", "credits_per_course", "courses_per_semester"]
    );
    assert_eq!(Config::section_keys("database").count(), 0);
}
