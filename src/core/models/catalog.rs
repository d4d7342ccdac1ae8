//! Course catalog

use super::course::{Course, CourseStatus};
use crate::core::graph::{GraphError, PrerequisiteGraph};
use crate::core::transcript::Transcript;
use std::collections::HashMap;

/// A stored status that disagrees with the status derived from prerequisites
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMismatch {
    /// Course code
    pub code: String,
    /// Status recorded in the data set
    pub stored: CourseStatus,
    /// Status implied by prerequisite completion
    pub derived: CourseStatus,
}

/// Collection of courses indexed by code, in declaration order
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    courses: Vec<Course>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a list of courses
    ///
    /// # Errors
    /// Returns an error naming the offending course on a duplicate code or a
    /// zero-credit course.
    pub fn from_courses(courses: Vec<Course>) -> Result<Self, String> {
        let mut catalog = Self::new();
        for course in courses {
            catalog.add_course(course)?;
        }
        Ok(catalog)
    }

    /// Add a course to the catalog
    ///
    /// # Errors
    /// Returns an error if the code already exists or the course has zero credits.
    pub fn add_course(&mut self, course: Course) -> Result<(), String> {
        if course.credits == 0 {
            return Err(format!("Course '{}' must have positive credits", course.code));
        }
        if self.index.contains_key(&course.code) {
            return Err(format!("Duplicate course code '{}'", course.code));
        }
        self.index.insert(course.code.clone(), self.courses.len());
        self.courses.push(course);
        Ok(())
    }

    /// Get a course by code
    #[must_use]
    pub fn get_course(&self, code: &str) -> Option<&Course> {
        self.index.get(code).map(|&idx| &self.courses[idx])
    }

    /// Get a mutable reference to a course by code
    pub fn get_course_mut(&mut self, code: &str) -> Option<&mut Course> {
        self.index.get(code).map(|&idx| &mut self.courses[idx])
    }

    /// All courses in declaration order
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Number of courses
    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether the catalog has no courses
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Build the prerequisite graph for every course in the catalog
    ///
    /// Prerequisites that reference courses outside the catalog become leaf nodes.
    #[must_use]
    pub fn build_graph(&self) -> PrerequisiteGraph {
        let mut graph = PrerequisiteGraph::new();
        for course in &self.courses {
            graph.add_course(&course.code);
        }
        for course in &self.courses {
            for prereq in &course.prerequisites {
                graph.add_prerequisite(&course.code, prereq);
            }
        }
        graph
    }

    /// Transitive prerequisite chain of a course
    ///
    /// # Errors
    /// Returns [`GraphError::Cycle`] if the chain runs into a cycle.
    pub fn prerequisite_chain(&self, code: &str) -> Result<Vec<String>, GraphError> {
        self.build_graph().prerequisite_chain(code)
    }

    /// Prerequisites referenced by catalog courses but missing from the catalog
    ///
    /// # Returns
    /// `(course, missing prerequisite)` pairs in declaration order
    #[must_use]
    pub fn external_prerequisites(&self) -> Vec<(String, String)> {
        self.courses
            .iter()
            .flat_map(|course| {
                course
                    .prerequisites
                    .iter()
                    .filter(|p| !self.index.contains_key(*p))
                    .map(|p| (course.code.clone(), p.clone()))
            })
            .collect()
    }

    /// Status implied by prerequisite completion
    ///
    /// Completed and in-progress courses keep their status. Any other course
    /// is available when every prerequisite present in the catalog is
    /// completed, otherwise locked. Returns `None` for unknown codes.
    #[must_use]
    pub fn derived_status(&self, code: &str) -> Option<CourseStatus> {
        let course = self.get_course(code)?;
        Some(match course.status {
            CourseStatus::Completed | CourseStatus::InProgress => course.status,
            CourseStatus::Available | CourseStatus::Locked => {
                let satisfied = course.prerequisites.iter().all(|p| {
                    self.get_course(p)
                        .is_none_or(|c| c.status == CourseStatus::Completed)
                });
                if satisfied {
                    CourseStatus::Available
                } else {
                    CourseStatus::Locked
                }
            }
        })
    }

    /// Courses whose stored status differs from the derived status
    #[must_use]
    pub fn status_mismatches(&self) -> Vec<StatusMismatch> {
        self.courses
            .iter()
            .filter_map(|course| {
                let derived = self.derived_status(&course.code)?;
                (derived != course.status).then(|| StatusMismatch {
                    code: course.code.clone(),
                    stored: course.status,
                    derived,
                })
            })
            .collect()
    }

    /// Replace stored statuses with derived ones
    ///
    /// # Returns
    /// Number of courses whose status changed
    pub fn apply_derived_statuses(&mut self) -> usize {
        let mismatches = self.status_mismatches();
        for mismatch in &mismatches {
            if let Some(course) = self.get_course_mut(&mismatch.code) {
                course.status = mismatch.derived;
            }
        }
        mismatches.len()
    }

    /// Mark courses from a transcript as completed or in progress
    ///
    /// # Returns
    /// Number of catalog courses updated
    pub fn apply_transcript(&mut self, transcript: &Transcript) -> usize {
        let mut updated = 0;
        for code in transcript.completed_codes() {
            if let Some(course) = self.get_course_mut(code) {
                course.status = CourseStatus::Completed;
                updated += 1;
            }
        }
        for code in transcript.in_progress_codes() {
            if let Some(course) = self.get_course_mut(code) {
                if course.status != CourseStatus::Completed {
                    course.status = CourseStatus::InProgress;
                    updated += 1;
                }
            }
        }
        updated
    }

    /// Sum of credits over courses with the given status
    #[must_use]
    pub fn credits_with_status(&self, status: CourseStatus) -> u32 {
        self.courses
            .iter()
            .filter(|c| c.status == status)
            .map(|c| c.credits)
            .fold(0, u32::saturating_add)
    }
}
