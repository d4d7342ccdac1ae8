//! Major model

use serde::{Deserialize, Serialize};

/// A degree program with its list of major courses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Major {
    /// Short identifier (e.g., "cs")
    pub id: String,

    /// Display name (e.g., "Computer Science")
    pub name: String,

    /// Credits required to graduate
    pub total_credits: u32,

    /// Core curriculum credits shared by every major
    pub core_credits: u32,

    /// Major course codes
    #[serde(default)]
    pub courses: Vec<String>,
}

impl Major {
    /// Create a new major with no courses
    #[must_use]
    pub const fn new(id: String, name: String, total_credits: u32, core_credits: u32) -> Self {
        Self {
            id,
            name,
            total_credits,
            core_credits,
            courses: Vec::new(),
        }
    }

    /// Add a course code to the major
    pub fn add_course(&mut self, code: String) {
        if !self.courses.contains(&code) {
            self.courses.push(code);
        }
    }

    /// Whether the major lists the given course
    #[must_use]
    pub fn requires(&self, code: &str) -> bool {
        self.courses.iter().any(|c| c == code)
    }

    /// Number of major courses
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }
}
