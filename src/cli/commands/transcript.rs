//! Transcript import command handler

use eagle_plan::config::Config;
use eagle_plan::core::transcript::{load_transcript, Transcript};
use eagle_plan::{error, info};
use std::path::Path;

use super::{load_data, save_data};

/// Parse a transcript and optionally apply it to the catalog
pub fn run(config: &Config, file: &Path, apply: bool) {
    let transcript = match load_transcript(file) {
        Ok(transcript) => transcript,
        Err(e) => {
            error!("Transcript import failed for {}: {e}", file.display());
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    };
    info!(
        "Parsed {} transcript entries from {}",
        transcript.entries.len(),
        file.display()
    );

    print_transcript(&transcript);

    if !apply {
        return;
    }

    let mut loaded = load_data(config);
    let mut catalog = match loaded.data.catalog() {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("✗ Invalid catalog: {e}");
            std::process::exit(1);
        }
    };
    let updated = catalog.apply_transcript(&transcript);
    let unlocked = catalog.apply_derived_statuses();
    loaded.data.store_catalog(&catalog);
    loaded.data.student.completed_credits = loaded
        .data
        .student
        .completed_credits
        .max(transcript.completed_credits());

    println!("\n✓ Updated {updated} course(s) from transcript, {unlocked} status change(s) from prerequisites");
    save_data(&loaded);
}

fn print_transcript(transcript: &Transcript) {
    println!(
        "{:<10} {:<40} {:>7}  {:<5} Semester",
        "Code", "Name", "Credits", "Grade"
    );
    for entry in &transcript.entries {
        println!(
            "{:<10} {:<40} {:>7}  {:<5} {}",
            entry.code, entry.name, entry.credits, entry.grade, entry.semester
        );
    }
    println!(
        "\nCompleted credits: {} of {} attempted",
        transcript.completed_credits(),
        transcript.total_credits()
    );
}
