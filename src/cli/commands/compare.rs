//! Major comparison command handler

use eagle_plan::config::Config;
use eagle_plan::core::compare::MajorComparison;

use super::load_data;

/// Compare two majors and print the switch analysis
pub fn run(config: &Config, major: &str, other: &str) {
    let loaded = load_data(config);
    match loaded.data.compare(major, other, config.comparison_settings()) {
        Ok(comparison) => print_comparison(&comparison),
        Err(e) => {
            eprintln!("✗ {e}");
            let known: Vec<&str> = loaded.data.majors.iter().map(|m| m.id.as_str()).collect();
            if !known.is_empty() {
                eprintln!("  Known majors: {}", known.join(", "));
            }
            std::process::exit(1);
        }
    }
}

fn print_comparison(c: &MajorComparison) {
    println!("{} vs {}", c.primary, c.other);
    println!("Overlap: {}%\n", c.overlap_percentage);

    print_list("Shared courses", &c.overlapping);
    print_list(&format!("Only in {}", c.primary), &c.unique_to_primary);
    print_list(&format!("Only in {}", c.other), &c.unique_to_other);

    println!("If you switch to {}:", c.other);
    println!("  Transferable credits: {}", c.transferable_credits);
    println!("  Additional credits:   {}", c.additional_credits);
    println!("  Extra semesters:      {}", c.extra_semesters);
}

fn print_list(title: &str, codes: &[String]) {
    println!("{title} ({}):", codes.len());
    if codes.is_empty() {
        println!("  (none)");
    }
    for code in codes {
        println!("  {code}");
    }
    println!();
}
