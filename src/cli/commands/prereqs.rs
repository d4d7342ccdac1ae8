//! Prerequisite chain command handler

use eagle_plan::config::Config;
use eagle_plan::core::models::Catalog;
use eagle_plan::{debug, warn};

use super::load_data;

/// Print the prerequisite chain of a course
pub fn run(config: &Config, code: &str, dedup: bool, dependents: bool) {
    let loaded = load_data(config);
    let catalog = match loaded.data.catalog() {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("✗ Invalid catalog: {e}");
            std::process::exit(1);
        }
    };

    if catalog.get_course(code).is_none() {
        warn!("{code} is not in the catalog");
    }

    let graph = catalog.build_graph();
    debug!("Prerequisite graph:\n{graph}");

    let chain = if dedup {
        graph.prerequisite_closure(code)
    } else {
        graph.prerequisite_chain(code)
    };

    match chain {
        Ok(chain) if chain.is_empty() => println!("{code} has no prerequisites"),
        Ok(chain) => {
            println!("Prerequisites for {code}:");
            print_codes(&catalog, &chain);
        }
        Err(e) => {
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    }

    if dependents {
        let required_by = graph.dependents_chain(code);
        if required_by.is_empty() {
            println!("\nNo courses require {code}");
        } else {
            println!("\nRequired by:");
            print_codes(&catalog, &required_by);
        }
    }
}

fn print_codes(catalog: &Catalog, codes: &[String]) {
    for c in codes {
        if let Some(course) = catalog.get_course(c) {
            println!("  {c}  {} ({})", course.name, course.status);
        } else {
            println!("  {c} (not in catalog)");
        }
    }
}
