//! Shared library for `EaglePlan`
//! Contains the planning core used by the CLI and by integration tests

pub mod config;
pub mod core;
pub mod logger;

pub use crate::core::get_version;
