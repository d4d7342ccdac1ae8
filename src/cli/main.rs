//! Command-line interface entry point for `EaglePlan`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use eagle_plan::config::Config;
use eagle_plan::info;
use eagle_plan::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config; fallback warn
    let effective_level = args
        .log_level
        .map(std::convert::Into::into)
        .or_else(|| config.logging.level.parse::<Level>().ok())
        .unwrap_or(Level::Warn);

    let mut level = effective_level;
    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // CLI flag wins, otherwise config logging.file if set
    let config_log_path: Option<std::path::PathBuf> = if config.logging.file.is_empty() {
        None
    } else {
        Some(std::path::PathBuf::from(&config.logging.file))
    };

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults);
        }
        Command::Courses { derive_status } => {
            commands::courses::run(&config, derive_status);
        }
        Command::Prereqs {
            code,
            dedup,
            dependents,
        } => {
            commands::prereqs::run(&config, &code, dedup, dependents);
        }
        Command::Plan { subcommand, save } => {
            commands::plan::run(subcommand, &config, save);
        }
        Command::Compare { major, other } => {
            commands::compare::run(&config, &major, &other);
        }
        Command::Transcript { file, apply } => {
            commands::transcript::run(&config, &file, apply);
        }
        Command::Export {
            format,
            output,
            stdout,
        } => {
            commands::export::run(&config, format.into(), output.as_deref(), stdout);
        }
    }
}
