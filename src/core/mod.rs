//! Core module for degree-planning functionality

pub mod compare;
pub mod data;
pub mod export;
pub mod graph;
pub mod models;
pub mod planner;
pub mod transcript;

/// Returns the current version of the `EaglePlan` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
