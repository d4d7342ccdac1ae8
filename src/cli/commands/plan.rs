//! Plan command handler

use crate::args::PlanSubcommand;
use eagle_plan::config::Config;
use eagle_plan::core::models::{Catalog, Season};
use eagle_plan::core::planner::{PlacementError, SemesterPlan};
use eagle_plan::{error, info, verbose};

use super::{load_data, save_data};

/// Dispatch plan subcommands
///
/// Mutating subcommands only touch the data file when `save` is set.
pub fn run(subcommand: PlanSubcommand, config: &Config, save: bool) {
    let mut loaded = load_data(config);

    match subcommand {
        PlanSubcommand::Show => {
            show(&loaded.data.plan);
            return;
        }
        PlanSubcommand::Check => {
            let catalog = match loaded.data.catalog() {
                Ok(catalog) => catalog,
                Err(e) => {
                    eprintln!("✗ Invalid catalog: {e}");
                    std::process::exit(1);
                }
            };
            check(&loaded.data.plan, &catalog);
            return;
        }
        _ => {}
    }

    let plan = &mut loaded.data.plan;
    let outcome = match subcommand {
        PlanSubcommand::Show | PlanSubcommand::Check => return,
        PlanSubcommand::AddSemester { season, year } => {
            Ok(add_semester(plan, season.into(), year, config.planner.max_credits))
        }
        PlanSubcommand::Place { course, semester } => plan
            .place_from_pool(&course, &semester)
            .map(|id| format!("✓ Placed {course} in {semester} as {id}")),
        PlanSubcommand::Move { course, semester } => plan
            .move_course(&course, &semester)
            .map(|()| format!("✓ Moved {course} to {semester}")),
        PlanSubcommand::Lock { course } => plan.toggle_lock(&course).map(|locked| {
            if locked {
                format!("✓ Locked {course}")
            } else {
                format!("✓ Unlocked {course}")
            }
        }),
        PlanSubcommand::Remove { course } => plan
            .remove_course(&course)
            .map(|removed| format!("✓ Removed {} ({})", removed.code, removed.id)),
    };

    match outcome {
        Ok(message) => {
            println!("{message}");
            info!("{message}");
        }
        Err(e) => fail(&e),
    }

    if save {
        save_data(&loaded);
    } else {
        verbose!("Plan not saved; pass --save to write it back");
    }
}

fn fail(e: &PlacementError) -> ! {
    error!("Plan change rejected: {e}");
    eprintln!("✗ {e}");
    std::process::exit(1);
}

fn add_semester(plan: &mut SemesterPlan, season: Season, year: u32, max_credits: u32) -> String {
    let id = plan.add_semester(season, year, max_credits);
    format!("✓ Added {season} {year} as {id} ({max_credits} credit cap)")
}

fn show(plan: &SemesterPlan) {
    for semester in &plan.semesters {
        let marker = if semester.is_overloaded() { " ✗ over cap" } else { "" };
        println!(
            "\n{} [{}]  {}/{} credits{marker}",
            semester.name,
            semester.id,
            semester.total_credits(),
            semester.max_credits
        );
        if semester.courses.is_empty() {
            println!("  (no courses)");
        }
        for course in &semester.courses {
            let lock = if course.is_locked { " [locked]" } else { "" };
            println!(
                "  {:<8} {:<10} {:<40} {:>2} cr{lock}",
                course.id, course.code, course.name, course.credits
            );
        }
    }

    println!("\nAvailable courses:");
    if plan.available.is_empty() {
        println!("  (none)");
    }
    for course in &plan.available {
        println!(
            "  {:<8} {:<10} {:<40} {:>2} cr",
            course.id, course.code, course.name, course.credits
        );
    }

    println!(
        "\nPlanned: {} courses, {} credits",
        plan.course_count(),
        plan.total_credits()
    );
}

fn check(plan: &SemesterPlan, catalog: &Catalog) {
    let overloaded = plan.overloaded_semesters();
    let violations = plan.prerequisite_violations(catalog);

    for semester in &overloaded {
        println!(
            "✗ {} is over its cap: {}/{} credits",
            semester.name,
            semester.total_credits(),
            semester.max_credits
        );
    }
    for violation in &violations {
        println!("✗ {violation}");
    }

    if overloaded.is_empty() && violations.is_empty() {
        println!("✓ Plan is within credit caps and prerequisite order");
    } else {
        std::process::exit(1);
    }
}
