//! Semester scheduling bucket

use super::course::CourseType;
use crate::core::planner::would_exceed_cap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Academic term season
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    /// Spring term
    Spring,
    /// Summer term
    Summer,
    /// Fall term
    Fall,
}

impl Season {
    /// Month and day the term starts, used for calendar export
    #[must_use]
    pub const fn start_month_day(&self) -> (u32, u32) {
        match self {
            Self::Spring => (1, 15),
            Self::Summer => (6, 1),
            Self::Fall => (8, 25),
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let as_str = match self {
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Fall => "Fall",
        };
        f.write_str(as_str)
    }
}

/// A course placed (or placeable) in a semester
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedCourse {
    /// Placement identifier, unique within a plan
    pub id: String,
    /// Course code
    pub code: String,
    /// Course name
    pub name: String,
    /// Credit hours
    pub credits: u32,
    /// Locked placements cannot be moved
    #[serde(default)]
    pub is_locked: bool,
    /// Requirement category
    #[serde(rename = "type")]
    pub course_type: CourseType,
}

impl PlannedCourse {
    /// Create an unlocked placement
    #[must_use]
    pub const fn new(
        id: String,
        code: String,
        name: String,
        credits: u32,
        course_type: CourseType,
    ) -> Self {
        Self {
            id,
            code,
            name,
            credits,
            is_locked: false,
            course_type,
        }
    }
}

/// A semester with a credit cap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Semester {
    /// Identifier (e.g., "s1")
    pub id: String,
    /// Display name (e.g., "Fall 2025")
    pub name: String,
    /// Calendar year
    pub year: u32,
    /// Term season
    pub season: Season,
    /// Credit cap
    pub max_credits: u32,
    /// Placed courses in order
    #[serde(default)]
    pub courses: Vec<PlannedCourse>,
}

impl Semester {
    /// Create an empty semester named after its season and year
    #[must_use]
    pub fn new(id: String, season: Season, year: u32, max_credits: u32) -> Self {
        Self {
            id,
            name: format!("{season} {year}"),
            year,
            season,
            max_credits,
            courses: Vec::new(),
        }
    }

    /// Sum of placed credits, saturating at `u32::MAX`
    #[must_use]
    pub fn total_credits(&self) -> u32 {
        self.courses
            .iter()
            .map(|c| c.credits)
            .fold(0, u32::saturating_add)
    }

    /// Whether placed credits exceed the cap
    #[must_use]
    pub fn is_overloaded(&self) -> bool {
        self.total_credits() > self.max_credits
    }

    /// Whether a course of the given weight fits under the cap
    #[must_use]
    pub fn can_accept(&self, credits: u32) -> bool {
        !would_exceed_cap(self.total_credits(), self.max_credits, credits)
    }

    /// Position of a placement by id
    #[must_use]
    pub fn position_of(&self, course_id: &str) -> Option<usize> {
        self.courses.iter().position(|c| c.id == course_id)
    }

    /// Whether a course code is placed in this semester
    #[must_use]
    pub fn contains_code(&self, code: &str) -> bool {
        self.courses.iter().any(|c| c.code == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planned(id: &str, credits: u32) -> PlannedCourse {
        PlannedCourse::new(
            id.to_string(),
            format!("CODE {id}"),
            format!("Course {id}"),
            credits,
            CourseType::Major,
        )
    }

    #[test]
    fn test_semester_name_from_season() {
        let semester = Semester::new("s1".to_string(), Season::Fall, 2025, 18);
        assert_eq!(semester.name, "Fall 2025");
        assert_eq!(semester.total_credits(), 0);
    }

    #[test]
    fn test_can_accept_boundary() {
        let mut semester = Semester::new("s1".to_string(), Season::Fall, 2025, 18);
        for (i, credits) in [6, 6, 3].into_iter().enumerate() {
            semester.courses.push(planned(&i.to_string(), credits));
        }

        assert_eq!(semester.total_credits(), 15);
        assert!(semester.can_accept(3));
        assert!(!semester.can_accept(4));
        assert!(!semester.is_overloaded());
    }

    #[test]
    fn test_total_credits_saturates() {
        let mut semester = Semester::new("s1".to_string(), Season::Fall, 2025, 18);
        semester.courses.push(planned("a", 4_000_000_000));
        semester.courses.push(planned("b", 4_000_000_000));

        assert_eq!(semester.total_credits(), u32::MAX);
        assert!(semester.is_overloaded());
        assert!(!semester.can_accept(0));
    }

    #[test]
    fn test_overloaded() {
        let mut semester = Semester::new("s1".to_string(), Season::Spring, 2026, 6);
        semester.courses.push(planned("a", 4));
        semester.courses.push(planned("b", 4));
        assert!(semester.is_overloaded());
    }

    #[test]
    fn test_season_start_dates() {
        assert_eq!(Season::Fall.start_month_day(), (8, 25));
        assert_eq!(Season::Spring.to_string(), "Spring");
    }
}
