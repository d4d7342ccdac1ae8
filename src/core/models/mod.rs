//! Data models for `EaglePlan`

pub mod catalog;
pub mod course;
pub mod major;
pub mod semester;

pub use catalog::{Catalog, StatusMismatch};
pub use course::{Course, CourseStatus, CourseType};
pub use major::Major;
pub use semester::{PlannedCourse, Season, Semester};
