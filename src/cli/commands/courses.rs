//! Courses command handler

use eagle_plan::config::Config;
use eagle_plan::core::models::{Catalog, CourseStatus};
use eagle_plan::{verbose, warn};

use super::load_data;

/// List the catalog, optionally alongside derived statuses
pub fn run(config: &Config, derive_status: bool) {
    let loaded = load_data(config);
    let catalog = match loaded.data.catalog() {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("✗ Invalid catalog: {e}");
            std::process::exit(1);
        }
    };

    print_catalog(&catalog, derive_status);

    for (course, missing) in catalog.external_prerequisites() {
        warn!("{course} lists prerequisite {missing}, which is not in the catalog");
    }

    if let Some(cycle) = catalog.build_graph().find_cycle() {
        eprintln!("✗ Prerequisite cycle detected: {}", cycle.join(" -> "));
        std::process::exit(1);
    }

    if derive_status {
        let mismatches = catalog.status_mismatches();
        if mismatches.is_empty() {
            println!("\n✓ Stored statuses match prerequisite completion");
        } else {
            println!("\n✗ {} course(s) with a stale status:", mismatches.len());
            for m in &mismatches {
                println!("  {}: stored {}, derived {}", m.code, m.stored, m.derived);
            }
        }
    }
}

fn print_catalog(catalog: &Catalog, derive_status: bool) {
    println!(
        "{:<10} {:<40} {:>7}  {:<12} {:<9} Prerequisites",
        "Code", "Name", "Credits", "Status", "Type"
    );
    for course in catalog.courses() {
        let status = if derive_status {
            match catalog.derived_status(&course.code) {
                Some(derived) if derived != course.status => {
                    format!("{} -> {derived}", course.status)
                }
                _ => course.status.to_string(),
            }
        } else {
            course.status.to_string()
        };
        let prereqs = if course.has_prerequisites() {
            course.prerequisites.join(", ")
        } else {
            "-".to_string()
        };
        println!(
            "{:<10} {:<40} {:>7}  {:<12} {:<9} {prereqs}",
            course.code,
            course.name,
            course.credits,
            status,
            course.course_type.to_string()
        );
    }

    verbose!(
        "\n{} courses: {} credits completed, {} in progress",
        catalog.len(),
        catalog.credits_with_status(CourseStatus::Completed),
        catalog.credits_with_status(CourseStatus::InProgress)
    );
}
