//! Course model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Completion status of a course for the current student
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CourseStatus {
    /// Course has been passed
    Completed,
    /// Course is being taken this term
    InProgress,
    /// All prerequisites are satisfied
    Available,
    /// At least one prerequisite is outstanding
    Locked,
}

impl CourseStatus {
    /// Short label used in listings
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::InProgress => "in-progress",
            Self::Available => "available",
            Self::Locked => "locked",
        }
    }
}

impl fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CourseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "completed" | "done" => Ok(Self::Completed),
            "in-progress" | "in_progress" | "inprogress" => Ok(Self::InProgress),
            "available" => Ok(Self::Available),
            "locked" => Ok(Self::Locked),
            _ => Err(format!("Unknown course status: {s}")),
        }
    }
}

/// Requirement category of a course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseType {
    /// Required by the major
    Major,
    /// Counts toward a minor
    Minor,
    /// Core curriculum
    Core,
    /// Free elective
    Elective,
}

impl fmt::Display for CourseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let as_str = match self {
            Self::Major => "major",
            Self::Minor => "minor",
            Self::Core => "core",
            Self::Elective => "elective",
        };
        f.write_str(as_str)
    }
}

/// Represents a course in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Course code (e.g., "CSCE 1030")
    pub code: String,

    /// Course name (e.g., "Computer Science I")
    pub name: String,

    /// Credit hours
    pub credits: u32,

    /// Prerequisites - stored as course codes, in declared order
    #[serde(default)]
    pub prerequisites: Vec<String>,

    /// Completion status
    pub status: CourseStatus,

    /// Requirement category
    #[serde(rename = "type")]
    pub course_type: CourseType,
}

impl Course {
    /// Create a new course with no prerequisites
    ///
    /// # Arguments
    /// * `code` - Course code
    /// * `name` - Full course name
    /// * `credits` - Credit hours
    /// * `status` - Completion status
    /// * `course_type` - Requirement category
    #[must_use]
    pub const fn new(
        code: String,
        name: String,
        credits: u32,
        status: CourseStatus,
        course_type: CourseType,
    ) -> Self {
        Self {
            code,
            name,
            credits,
            prerequisites: Vec::new(),
            status,
            course_type,
        }
    }

    /// Add a prerequisite by course code
    pub fn add_prerequisite(&mut self, prereq_code: String) {
        if !self.prerequisites.contains(&prereq_code) {
            self.prerequisites.push(prereq_code);
        }
    }

    /// Builder-style variant of [`Course::add_prerequisite`]
    #[must_use]
    pub fn with_prerequisite(mut self, prereq_code: &str) -> Self {
        self.add_prerequisite(prereq_code.to_string());
        self
    }

    /// Whether the course has any prerequisites
    #[must_use]
    pub fn has_prerequisites(&self) -> bool {
        !self.prerequisites.is_empty()
    }
}
