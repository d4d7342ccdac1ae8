//! Semester planner
//!
//! Holds the ordered semesters of a degree plan together with the pool of
//! courses that can still be placed. Every placement honors the semester
//! credit cap; rejected operations leave the plan untouched.

use crate::core::models::{Catalog, CourseStatus, PlannedCourse, Season, Semester};
use crate::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Check whether adding `incoming` credits to `current` would exceed `cap`
///
/// Reaching the cap exactly is allowed.
#[must_use]
pub const fn would_exceed_cap(current: u32, cap: u32, incoming: u32) -> bool {
    match current.checked_add(incoming) {
        Some(total) => total > cap,
        None => true,
    }
}

/// Reasons a planner operation was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    /// No placement or pool course with this id
    UnknownCourse(String),
    /// No semester with this id
    UnknownSemester(String),
    /// The placement is locked and cannot move
    Locked(String),
    /// The target semester would go over its credit cap
    CreditCapExceeded {
        /// Target semester name
        semester: String,
        /// Credits already placed
        current: u32,
        /// Credits of the incoming course
        incoming: u32,
        /// Semester cap
        cap: u32,
    },
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCourse(id) => write!(f, "Unknown course '{id}'"),
            Self::UnknownSemester(id) => write!(f, "Unknown semester '{id}'"),
            Self::Locked(id) => write!(f, "Course '{id}' is locked"),
            Self::CreditCapExceeded {
                semester,
                current,
                incoming,
                cap,
            } => write!(
                f,
                "{semester} would exceed its credit cap ({current} + {incoming} > {cap})"
            ),
        }
    }
}

impl std::error::Error for PlacementError {}

/// A scheduled course whose prerequisite is not scheduled before it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrerequisiteViolation {
    /// Code of the scheduled course
    pub course: String,
    /// Semester the course is scheduled in
    pub semester: String,
    /// Offending prerequisite code
    pub prerequisite: String,
    /// Semester the prerequisite is scheduled in, `None` if it is neither
    /// scheduled nor completed
    pub prerequisite_semester: Option<String>,
}

impl fmt::Display for PrerequisiteViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.prerequisite_semester {
            Some(sem) => write!(
                f,
                "{} ({}) requires {} which is scheduled in {sem}",
                self.course, self.semester, self.prerequisite
            ),
            None => write!(
                f,
                "{} ({}) requires {} which is not scheduled or completed",
                self.course, self.semester, self.prerequisite
            ),
        }
    }
}

/// Semester-by-semester degree plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterPlan {
    /// Semesters in chronological order
    #[serde(default)]
    pub semesters: Vec<Semester>,
    /// Courses available to place
    #[serde(default)]
    pub available: Vec<PlannedCourse>,
}

impl SemesterPlan {
    /// Create a plan from semesters and an available-course pool
    #[must_use]
    pub const fn new(semesters: Vec<Semester>, available: Vec<PlannedCourse>) -> Self {
        Self {
            semesters,
            available,
        }
    }

    /// Get a semester by id
    #[must_use]
    pub fn semester(&self, semester_id: &str) -> Option<&Semester> {
        self.semesters.iter().find(|s| s.id == semester_id)
    }

    fn semester_index(&self, semester_id: &str) -> Result<usize, PlacementError> {
        self.semesters
            .iter()
            .position(|s| s.id == semester_id)
            .ok_or_else(|| PlacementError::UnknownSemester(semester_id.to_string()))
    }

    /// Append an empty semester after the existing ones
    ///
    /// # Returns
    /// The id of the new semester (`s1`, `s2`, ...; skipping ids already in use)
    pub fn add_semester(&mut self, season: Season, year: u32, max_credits: u32) -> String {
        let id = (self.semesters.len() + 1..)
            .map(|n| format!("s{n}"))
            .find(|id| self.semester(id).is_none())
            .unwrap_or_default();
        self.semesters
            .push(Semester::new(id.clone(), season, year, max_credits));
        id
    }

    /// Locate a placement
    ///
    /// # Returns
    /// `(semester index, position within semester)`
    #[must_use]
    pub fn find_placement(&self, course_id: &str) -> Option<(usize, usize)> {
        self.semesters
            .iter()
            .enumerate()
            .find_map(|(idx, s)| s.position_of(course_id).map(|pos| (idx, pos)))
    }

    /// Get a placement by id
    #[must_use]
    pub fn placement(&self, course_id: &str) -> Option<&PlannedCourse> {
        self.find_placement(course_id)
            .map(|(sem, pos)| &self.semesters[sem].courses[pos])
    }

    /// Find a pool course by id or code
    #[must_use]
    pub fn available_course(&self, key: &str) -> Option<&PlannedCourse> {
        self.available
            .iter()
            .find(|c| c.id == key)
            .or_else(|| self.available.iter().find(|c| c.code == key))
    }

    fn check_capacity(&self, sem_idx: usize, incoming: u32) -> Result<(), PlacementError> {
        let semester = &self.semesters[sem_idx];
        let current = semester.total_credits();
        if would_exceed_cap(current, semester.max_credits, incoming) {
            debug!(
                "Rejected {incoming} credits for {}: {current}/{}",
                semester.name, semester.max_credits
            );
            return Err(PlacementError::CreditCapExceeded {
                semester: semester.name.clone(),
                current,
                incoming,
                cap: semester.max_credits,
            });
        }
        Ok(())
    }

    fn fresh_placement_id(&self, base: &str) -> String {
        (1_u32..)
            .map(|n| format!("{base}-{n}"))
            .find(|id| self.find_placement(id).is_none())
            .unwrap_or_else(|| base.to_string())
    }

    /// Copy a pool course into a semester
    ///
    /// The pool keeps the course, so it can be placed again later.
    ///
    /// # Returns
    /// The id given to the new placement
    ///
    /// # Errors
    /// Returns an error if the pool course or semester is unknown, the pool
    /// course is locked, or the semester cap would be exceeded.
    pub fn place_from_pool(
        &mut self,
        pool_key: &str,
        target_semester: &str,
    ) -> Result<String, PlacementError> {
        let course = self
            .available_course(pool_key)
            .cloned()
            .ok_or_else(|| PlacementError::UnknownCourse(pool_key.to_string()))?;
        if course.is_locked {
            return Err(PlacementError::Locked(course.id));
        }

        let target = self.semester_index(target_semester)?;
        self.check_capacity(target, course.credits)?;

        let id = self.fresh_placement_id(&course.id);
        let placed = PlannedCourse {
            id: id.clone(),
            ..course
        };
        debug!("Placed {} in {}", placed.code, self.semesters[target].name);
        self.semesters[target].courses.push(placed);
        Ok(id)
    }

    /// Move a placed course to another semester
    ///
    /// Moving a course onto its own semester is a no-op.
    ///
    /// # Errors
    /// Returns an error if the course or semester is unknown, the course is
    /// locked, or the target cap would be exceeded.
    pub fn move_course(&mut self, course_id: &str, target_semester: &str) -> Result<(), PlacementError> {
        let (source, pos) = self
            .find_placement(course_id)
            .ok_or_else(|| PlacementError::UnknownCourse(course_id.to_string()))?;
        let target = self.semester_index(target_semester)?;

        let course = &self.semesters[source].courses[pos];
        if course.is_locked {
            return Err(PlacementError::Locked(course_id.to_string()));
        }
        if source == target {
            return Ok(());
        }
        self.check_capacity(target, course.credits)?;

        let course = self.semesters[source].courses.remove(pos);
        debug!(
            "Moved {} from {} to {}",
            course.code, self.semesters[source].name, self.semesters[target].name
        );
        self.semesters[target].courses.push(course);
        Ok(())
    }

    /// Flip the lock flag of a placement
    ///
    /// # Returns
    /// The new lock state
    ///
    /// # Errors
    /// Returns an error if the placement is unknown.
    pub fn toggle_lock(&mut self, course_id: &str) -> Result<bool, PlacementError> {
        let (sem, pos) = self
            .find_placement(course_id)
            .ok_or_else(|| PlacementError::UnknownCourse(course_id.to_string()))?;
        let course = &mut self.semesters[sem].courses[pos];
        course.is_locked = !course.is_locked;
        Ok(course.is_locked)
    }

    /// Remove a placement from its semester
    ///
    /// Locked placements can still be removed.
    ///
    /// # Errors
    /// Returns an error if the placement is unknown.
    pub fn remove_course(&mut self, course_id: &str) -> Result<PlannedCourse, PlacementError> {
        let (sem, pos) = self
            .find_placement(course_id)
            .ok_or_else(|| PlacementError::UnknownCourse(course_id.to_string()))?;
        Ok(self.semesters[sem].courses.remove(pos))
    }

    /// Semesters over their credit cap
    #[must_use]
    pub fn overloaded_semesters(&self) -> Vec<&Semester> {
        self.semesters.iter().filter(|s| s.is_overloaded()).collect()
    }

    /// Total credits across all semesters
    #[must_use]
    pub fn total_credits(&self) -> u32 {
        self.semesters
            .iter()
            .map(Semester::total_credits)
            .fold(0, u32::saturating_add)
    }

    /// Number of placements across all semesters
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.semesters.iter().map(|s| s.courses.len()).sum()
    }

    /// Scheduled courses whose prerequisites are not satisfied beforehand
    ///
    /// A prerequisite completed or in progress in the catalog is satisfied
    /// wherever else it is scheduled, so a later retake is not flagged.
    /// Otherwise it must be scheduled in an earlier semester. Prerequisites
    /// unknown to the catalog and not scheduled are assumed satisfied.
    #[must_use]
    pub fn prerequisite_violations(&self, catalog: &Catalog) -> Vec<PrerequisiteViolation> {
        let mut violations = Vec::new();

        for (idx, semester) in self.semesters.iter().enumerate() {
            for placed in &semester.courses {
                let Some(course) = catalog.get_course(&placed.code) else {
                    continue;
                };
                for prereq in &course.prerequisites {
                    let known = catalog.get_course(prereq);
                    let taken = known.is_some_and(|c| {
                        matches!(c.status, CourseStatus::Completed | CourseStatus::InProgress)
                    });
                    if taken {
                        continue;
                    }

                    let scheduled_in = self
                        .semesters
                        .iter()
                        .position(|s| s.contains_code(prereq));

                    let prerequisite_semester = match scheduled_in {
                        Some(prereq_idx) if prereq_idx < idx => continue,
                        Some(prereq_idx) => Some(self.semesters[prereq_idx].name.clone()),
                        None if known.is_none() => continue,
                        None => None,
                    };

                    violations.push(PrerequisiteViolation {
                        course: placed.code.clone(),
                        semester: semester.name.clone(),
                        prerequisite: prereq.clone(),
                        prerequisite_semester,
                    });
                }
            }
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Course, CourseType};

    fn planned(id: &str, code: &str, credits: u32) -> PlannedCourse {
        PlannedCourse::new(
            id.to_string(),
            code.to_string(),
            format!("{code} name"),
            credits,
            CourseType::Major,
        )
    }

    fn plan() -> SemesterPlan {
        let mut fall = Semester::new("s1".to_string(), Season::Fall, 2025, 18);
        fall.courses = vec![
            planned("c1", "CSCE 3110", 6),
            planned("c2", "MATH 2730", 6),
            planned("c3", "PHIL 1800", 3),
        ];
        fall.courses[1].is_locked = true;

        let mut spring = Semester::new("s2".to_string(), Season::Spring, 2026, 18);
        spring.courses = vec![planned("c4", "CSCE 3600", 3)];

        SemesterPlan::new(
            vec![fall, spring],
            vec![planned("ac1", "CSCE 4350", 3), planned("ac2", "CSCE 4200", 4)],
        )
    }

    #[test]
    fn test_would_exceed_cap() {
        assert!(!would_exceed_cap(15, 18, 3));
        assert!(would_exceed_cap(15, 18, 4));
        assert!(!would_exceed_cap(0, 0, 0));
        assert!(would_exceed_cap(u32::MAX, u32::MAX, 1));
    }

    #[test]
    fn test_place_at_cap_succeeds() {
        let mut plan = plan();
        let id = plan.place_from_pool("ac1", "s1").unwrap();

        assert_eq!(id, "ac1-1");
        assert_eq!(plan.semester("s1").unwrap().total_credits(), 18);
        // Pool keeps its copy
        assert!(plan.available_course("ac1").is_some());
    }

    #[test]
    fn test_place_over_cap_rejected_without_mutation() {
        let mut plan = plan();
        let before = plan.clone();

        let err = plan.place_from_pool("CSCE 4200", "s1").unwrap_err();
        assert_eq!(
            err,
            PlacementError::CreditCapExceeded {
                semester: "Fall 2025".to_string(),
                current: 15,
                incoming: 4,
                cap: 18,
            }
        );
        assert_eq!(plan, before);
    }

    #[test]
    fn test_repeat_placement_gets_unique_ids() {
        let mut plan = plan();
        let first = plan.place_from_pool("ac1", "s2").unwrap();
        let second = plan.place_from_pool("ac1", "s2").unwrap();
        assert_ne!(first, second);
        assert_eq!(plan.semester("s2").unwrap().courses.len(), 3);
    }

    #[test]
    fn test_move_course() {
        let mut plan = plan();
        plan.move_course("c1", "s2").unwrap();

        assert!(plan.semester("s1").unwrap().position_of("c1").is_none());
        assert_eq!(plan.semester("s2").unwrap().total_credits(), 9);
    }

    #[test]
    fn test_move_locked_course_rejected() {
        let mut plan = plan();
        assert_eq!(
            plan.move_course("c2", "s2"),
            Err(PlacementError::Locked("c2".to_string()))
        );
    }

    #[test]
    fn test_move_over_cap_keeps_source() {
        let mut plan = plan();
        plan.semesters[1].max_credits = 5;

        assert!(matches!(
            plan.move_course("c1", "s2"),
            Err(PlacementError::CreditCapExceeded { .. })
        ));
        assert!(plan.semester("s1").unwrap().position_of("c1").is_some());
    }

    #[test]
    fn test_move_to_same_semester_is_noop() {
        let mut plan = plan();
        let before = plan.clone();
        plan.move_course("c3", "s1").unwrap();
        assert_eq!(plan, before);
    }

    #[test]
    fn test_unknown_ids() {
        let mut plan = plan();
        assert_eq!(
            plan.move_course("nope", "s1"),
            Err(PlacementError::UnknownCourse("nope".to_string()))
        );
        assert_eq!(
            plan.move_course("c1", "s9"),
            Err(PlacementError::UnknownSemester("s9".to_string()))
        );
        assert!(plan.place_from_pool("ac9", "s1").is_err());
    }

    #[test]
    fn test_toggle_lock_and_remove() {
        let mut plan = plan();
        assert_eq!(plan.toggle_lock("c1"), Ok(true));
        assert_eq!(plan.toggle_lock("c1"), Ok(false));

        let removed = plan.remove_course("c2").unwrap();
        assert_eq!(removed.code, "MATH 2730");
        assert_eq!(plan.course_count(), 3);
        assert!(plan.remove_course("c2").is_err());
    }

    #[test]
    fn test_add_semester() {
        let mut plan = plan();
        let id = plan.add_semester(Season::Summer, 2026, 9);

        assert_eq!(id, "s3");
        let added = plan.semester("s3").unwrap();
        assert_eq!(added.name, "Summer 2026");
        assert_eq!(added.max_credits, 9);
        assert_eq!(plan.semesters.last().map(|s| s.id.as_str()), Some("s3"));
    }

    #[test]
    fn test_overloaded_semesters() {
        let mut plan = plan();
        assert!(plan.overloaded_semesters().is_empty());

        plan.semesters[0].max_credits = 12;
        let overloaded = plan.overloaded_semesters();
        assert_eq!(overloaded.len(), 1);
        assert_eq!(overloaded[0].id, "s1");
    }

    #[test]
    fn test_prerequisite_violations() {
        let catalog = Catalog::from_courses(vec![
            Course::new(
                "CSCE 2100".to_string(),
                "Data Structures".to_string(),
                3,
                CourseStatus::Locked,
                CourseType::Major,
            ),
            Course::new(
                "CSCE 3110".to_string(),
                "Algorithms".to_string(),
                3,
                CourseStatus::Locked,
                CourseType::Major,
            )
            .with_prerequisite("CSCE 2100"),
            Course::new(
                "CSCE 3600".to_string(),
                "Operating Systems".to_string(),
                3,
                CourseStatus::Locked,
                CourseType::Major,
            )
            .with_prerequisite("CSCE 3110"),
        ])
        .unwrap();

        let plan = plan();
        let violations = plan.prerequisite_violations(&catalog);

        // 3110 needs 2100, which is neither scheduled nor completed.
        // 3600 needs 3110, which is scheduled earlier, so it is fine.
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].course, "CSCE 3110");
        assert_eq!(violations[0].prerequisite_semester, None);
        assert!(violations[0].to_string().contains("not scheduled or completed"));
    }

    #[test]
    fn test_same_semester_prerequisite_is_violation() {
        let catalog = Catalog::from_courses(vec![
            Course::new(
                "PHIL 1800".to_string(),
                "Ethics".to_string(),
                3,
                CourseStatus::Locked,
                CourseType::Core,
            ),
            Course::new(
                "CSCE 3110".to_string(),
                "Algorithms".to_string(),
                3,
                CourseStatus::Locked,
                CourseType::Major,
            )
            .with_prerequisite("PHIL 1800"),
        ])
        .unwrap();

        let violations = plan().prerequisite_violations(&catalog);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].prerequisite_semester.as_deref(), Some("Fall 2025"));
    }

    #[test]
    fn test_completed_prerequisite_retaken_later_is_satisfied() {
        let catalog = Catalog::from_courses(vec![
            Course::new(
                "CSCE 2100".to_string(),
                "Data Structures".to_string(),
                3,
                CourseStatus::Completed,
                CourseType::Major,
            ),
            Course::new(
                "CSCE 3110".to_string(),
                "Algorithms".to_string(),
                3,
                CourseStatus::Locked,
                CourseType::Major,
            )
            .with_prerequisite("CSCE 2100"),
        ])
        .unwrap();

        // Retake of Data Structures in the spring, after Algorithms in the fall
        let mut plan = plan();
        plan.semesters[1].courses.push(planned("c5", "CSCE 2100", 3));

        assert!(plan.prerequisite_violations(&catalog).is_empty());

        // Not yet taken: the late placement is flagged
        let mut catalog = catalog;
        if let Some(course) = catalog.get_course_mut("CSCE 2100") {
            course.status = CourseStatus::Available;
        }
        let violations = plan.prerequisite_violations(&catalog);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].prerequisite_semester.as_deref(), Some("Spring 2026"));
    }
}
