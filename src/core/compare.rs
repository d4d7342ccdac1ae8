//! Major overlap comparison
//!
//! Compares the course lists of two majors to estimate how much of one
//! carries over when switching to, or adding, the other.

use crate::core::models::Major;

/// Assumptions used to turn course counts into credits and semesters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparisonSettings {
    /// Credits assumed per major course
    pub credits_per_course: u32,
    /// Major courses assumed per semester
    pub courses_per_semester: u32,
}

impl Default for ComparisonSettings {
    fn default() -> Self {
        Self {
            credits_per_course: 3,
            courses_per_semester: 4,
        }
    }
}

/// Result of comparing a primary major against another
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MajorComparison {
    /// Primary major name
    pub primary: String,
    /// Compared major name
    pub other: String,
    /// Courses in both majors, in primary order
    pub overlapping: Vec<String>,
    /// Courses only in the primary major
    pub unique_to_primary: Vec<String>,
    /// Courses only in the compared major
    pub unique_to_other: Vec<String>,
    /// Shared courses as a whole percentage of the longer course list
    pub overlap_percentage: u32,
    /// Credits from shared courses that apply to the compared major
    pub transferable_credits: u32,
    /// Credits still needed for the compared major
    pub additional_credits: u32,
    /// Estimated extra semesters to finish the compared major
    pub extra_semesters: u32,
}

/// Percentage of `shared` against `max(len_a, len_b)`, rounded half away from zero
///
/// Two empty lists have no overlap.
#[must_use]
pub fn overlap_percentage(shared: usize, len_a: usize, len_b: usize) -> u32 {
    let denominator = len_a.max(len_b);
    if denominator == 0 {
        return 0;
    }
    // (shared * 100 / denominator) rounded, in integer arithmetic
    let scaled = (shared * 200 + denominator) / (denominator * 2);
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

/// Compare a primary major with another major
#[must_use]
pub fn compare_majors(
    primary: &Major,
    other: &Major,
    settings: ComparisonSettings,
) -> MajorComparison {
    let overlapping: Vec<String> = primary
        .courses
        .iter()
        .filter(|c| other.requires(c))
        .cloned()
        .collect();
    let unique_to_primary: Vec<String> = primary
        .courses
        .iter()
        .filter(|c| !other.requires(c))
        .cloned()
        .collect();
    let unique_to_other: Vec<String> = other
        .courses
        .iter()
        .filter(|c| !primary.requires(c))
        .cloned()
        .collect();

    let overlap = overlap_percentage(
        overlapping.len(),
        primary.course_count(),
        other.course_count(),
    );

    let shared = u32::try_from(overlapping.len()).unwrap_or(u32::MAX);
    let missing = u32::try_from(unique_to_other.len()).unwrap_or(u32::MAX);

    MajorComparison {
        primary: primary.name.clone(),
        other: other.name.clone(),
        overlapping,
        unique_to_primary,
        unique_to_other,
        overlap_percentage: overlap,
        transferable_credits: shared.saturating_mul(settings.credits_per_course),
        additional_credits: missing.saturating_mul(settings.credits_per_course),
        extra_semesters: missing.div_ceil(settings.courses_per_semester.max(1)),
    }
}
