//! Planner data set loading and saving
//!
//! A data set bundles the student profile, course catalog, majors and the
//! semester plan in one TOML document. The sample data set is compiled in
//! and used whenever no data file is configured.

use crate::core::compare::{compare_majors, ComparisonSettings, MajorComparison};
use crate::core::export::PlanExport;
use crate::core::models::{Catalog, Course, Major};
use crate::core::planner::SemesterPlan;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::Path;

/// Sample data set shipped with the crate
const SAMPLE_DATA: &str = include_str!("../../assets/sample_data.toml");

/// Student summary shown on exports
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentProfile {
    /// Student name
    #[serde(default)]
    pub name: String,
    /// Declared major name
    #[serde(default)]
    pub major: String,
    /// Expected graduation term (e.g., "Spring 2027")
    #[serde(default)]
    pub expected_graduation: String,
    /// Credits required for the degree
    #[serde(default)]
    pub total_credits: u32,
    /// Credits already earned
    #[serde(default)]
    pub completed_credits: u32,
}

/// Everything the planner works on
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerData {
    /// Student profile
    #[serde(default)]
    pub student: StudentProfile,
    /// Catalog courses
    #[serde(default)]
    pub courses: Vec<Course>,
    /// Majors available for comparison
    #[serde(default)]
    pub majors: Vec<Major>,
    /// Semester plan
    #[serde(default)]
    pub plan: SemesterPlan,
}

impl PlannerData {
    /// Parse a data set from a TOML string
    ///
    /// # Errors
    /// Returns an error if the TOML cannot be parsed
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// The compiled-in sample data set
    ///
    /// # Panics
    /// Panics if the compiled-in sample TOML cannot be parsed
    #[must_use]
    pub fn sample() -> Self {
        Self::from_toml(SAMPLE_DATA).expect("Failed to parse compiled-in sample data")
    }

    /// Load a data set from a TOML file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_toml(&content)?)
    }

    /// Save the data set to a TOML file
    ///
    /// # Errors
    /// Returns an error if the data cannot be serialized or written
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn Error>> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(path, toml_str)?;
        Ok(())
    }

    /// Build a validated catalog from the course list
    ///
    /// # Errors
    /// Returns an error on duplicate codes or zero-credit courses
    pub fn catalog(&self) -> Result<Catalog, String> {
        Catalog::from_courses(self.courses.clone())
    }

    /// Write catalog statuses back into the course list
    pub fn store_catalog(&mut self, catalog: &Catalog) {
        self.courses = catalog.courses().to_vec();
    }

    /// Find a major by id or case-insensitive name
    #[must_use]
    pub fn major(&self, key: &str) -> Option<&Major> {
        self.majors
            .iter()
            .find(|m| m.id == key)
            .or_else(|| self.majors.iter().find(|m| m.name.eq_ignore_ascii_case(key)))
    }

    /// Compare two majors by id or name
    ///
    /// # Errors
    /// Returns an error naming the major that could not be found
    pub fn compare(
        &self,
        primary: &str,
        other: &str,
        settings: ComparisonSettings,
    ) -> Result<MajorComparison, String> {
        let primary = self
            .major(primary)
            .ok_or_else(|| format!("Unknown major '{primary}'"))?;
        let other = self
            .major(other)
            .ok_or_else(|| format!("Unknown major '{other}'"))?;
        Ok(compare_majors(primary, other, settings))
    }

    /// Snapshot of the plan for export
    #[must_use]
    pub fn export(&self) -> PlanExport {
        PlanExport::from_plan(&self.student, &self.plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_parses_and_validates() {
        let data = PlannerData::sample();
        assert!(!data.courses.is_empty());
        assert!(!data.majors.is_empty());
        assert!(!data.plan.semesters.is_empty());

        let catalog = data.catalog().expect("sample catalog should be valid");
        assert!(catalog.build_graph().find_cycle().is_none());
    }

    #[test]
    fn test_major_lookup_by_id_or_name() {
        let data = PlannerData::sample();
        assert!(data.major("cs").is_some());
        assert!(data.major("computer science").is_some());
        assert!(data.major("astrology").is_none());
    }

    #[test]
    fn test_compare_unknown_major() {
        let data = PlannerData::sample();
        let err = data
            .compare("cs", "nope", ComparisonSettings::default())
            .unwrap_err();
        assert_eq!(err, "Unknown major 'nope'");
    }

    #[test]
    fn test_empty_document() {
        let data = PlannerData::from_toml("").unwrap();
        assert_eq!(data, PlannerData::default());
    }
}
