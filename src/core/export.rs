//! Plan export
//!
//! Renders a semester plan as CSV, iCalendar or a self-contained HTML page.

use crate::core::data::StudentProfile;
use crate::core::models::Season;
use crate::core::planner::SemesterPlan;
use askama::Template;
use std::error::Error;
use std::fmt::{self, Write as _};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values, one row per course
    Csv,
    /// iCalendar with one all-day event per course
    Ical,
    /// Standalone HTML page
    Html,
}

impl ExportFormat {
    /// Get the file extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Ical => "ics",
            Self::Html => "html",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "ical" | "ics" | "calendar" => Ok(Self::Ical),
            "html" | "htm" => Ok(Self::Html),
            _ => Err(format!("Unknown export format: {s}")),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Ical => write!(f, "ical"),
            Self::Html => write!(f, "html"),
        }
    }
}

/// Course row in an export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportCourse {
    /// Placement id, unique within the plan
    pub id: String,
    /// Course code
    pub code: String,
    /// Course name
    pub name: String,
    /// Credit hours
    pub credits: u32,
}

/// Semester section in an export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSemester {
    /// Display name (e.g., "Fall 2025")
    pub name: String,
    /// Term season
    pub season: Season,
    /// Calendar year
    pub year: u32,
    /// Courses in plan order
    pub courses: Vec<ExportCourse>,
}

impl ExportSemester {
    /// Sum of course credits
    #[must_use]
    pub fn total_credits(&self) -> u32 {
        self.courses
            .iter()
            .map(|c| c.credits)
            .fold(0, u32::saturating_add)
    }
}

/// Snapshot of a plan ready for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanExport {
    /// Student name
    pub student: String,
    /// Declared major
    pub major: String,
    /// Expected graduation term
    pub expected_graduation: String,
    /// Credits required for the degree
    pub total_credits: u32,
    /// Credits already earned
    pub completed_credits: u32,
    /// Planned semesters
    pub semesters: Vec<ExportSemester>,
}

#[derive(Template)]
#[template(path = "plan.html")]
struct PlanHtml<'a> {
    export: &'a PlanExport,
    planned_credits: u32,
    progress_percent: u32,
}

impl PlanExport {
    /// Build an export from a student profile and a semester plan
    #[must_use]
    pub fn from_plan(student: &StudentProfile, plan: &SemesterPlan) -> Self {
        let semesters = plan
            .semesters
            .iter()
            .map(|s| ExportSemester {
                name: s.name.clone(),
                season: s.season,
                year: s.year,
                courses: s
                    .courses
                    .iter()
                    .map(|c| ExportCourse {
                        id: c.id.clone(),
                        code: c.code.clone(),
                        name: c.name.clone(),
                        credits: c.credits,
                    })
                    .collect(),
            })
            .collect();

        Self {
            student: student.name.clone(),
            major: student.major.clone(),
            expected_graduation: student.expected_graduation.clone(),
            total_credits: student.total_credits,
            completed_credits: student.completed_credits,
            semesters,
        }
    }

    /// Credits across all planned semesters
    #[must_use]
    pub fn planned_credits(&self) -> u32 {
        self.semesters
            .iter()
            .map(ExportSemester::total_credits)
            .fold(0, u32::saturating_add)
    }

    /// Render in the requested format
    ///
    /// # Errors
    /// Returns an error if template rendering fails.
    pub fn render(&self, format: ExportFormat) -> Result<String, Box<dyn Error>> {
        match format {
            ExportFormat::Csv => Ok(self.to_csv()),
            ExportFormat::Ical => Ok(self.to_ical()),
            ExportFormat::Html => self.to_html(),
        }
    }

    /// Render and write to a file
    ///
    /// # Errors
    /// Returns an error if rendering or writing fails.
    pub fn write_to(&self, format: ExportFormat, path: &Path) -> Result<(), Box<dyn Error>> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.render(format)?)?;
        Ok(())
    }

    /// CSV with header `Semester,Course Code,Course Name,Credits`
    ///
    /// Course names are always quoted.
    #[must_use]
    pub fn to_csv(&self) -> String {
        let mut csv = String::from("Semester,Course Code,Course Name,Credits\n");
        for semester in &self.semesters {
            for course in &semester.courses {
                let _ = writeln!(
                    csv,
                    "{},{},\"{}\",{}",
                    semester.name,
                    course.code,
                    course.name.replace('"', "\"\""),
                    course.credits
                );
            }
        }
        csv
    }

    /// iCalendar document with one all-day event per course on the semester start date
    ///
    /// Event UIDs combine the term, course code and placement id, so a course
    /// placed twice yields two distinct events. Lines longer than 75 octets
    /// are folded.
    #[must_use]
    pub fn to_ical(&self) -> String {
        let mut ics = String::new();
        push_ical_line(&mut ics, "BEGIN:VCALENDAR");
        push_ical_line(&mut ics, "VERSION:2.0");
        push_ical_line(&mut ics, "PRODID:-//EaglePlan//Degree Plan//EN");
        push_ical_line(&mut ics, "CALSCALE:GREGORIAN");

        for semester in &self.semesters {
            let (month, day) = semester.season.start_month_day();
            let date = format!("{:04}{month:02}{day:02}", semester.year);
            for course in &semester.courses {
                push_ical_line(&mut ics, "BEGIN:VEVENT");
                push_ical_line(
                    &mut ics,
                    &format!(
                        "UID:{}-{}-{}-{}@eagleplan",
                        semester.year,
                        semester.season,
                        uid_part(&course.code),
                        uid_part(&course.id)
                    ),
                );
                push_ical_line(&mut ics, &format!("DTSTAMP:{date}T000000Z"));
                push_ical_line(&mut ics, &format!("DTSTART;VALUE=DATE:{date}"));
                push_ical_line(
                    &mut ics,
                    &format!(
                        "SUMMARY:{}",
                        escape_ical_text(&format!("{} {}", course.code, course.name))
                    ),
                );
                push_ical_line(
                    &mut ics,
                    &format!(
                        "DESCRIPTION:{}",
                        escape_ical_text(&format!("{} credits, {}", course.credits, semester.name))
                    ),
                );
                push_ical_line(&mut ics, "END:VEVENT");
            }
        }

        push_ical_line(&mut ics, "END:VCALENDAR");
        ics
    }

    /// Standalone HTML page
    ///
    /// # Errors
    /// Returns an error if template rendering fails.
    pub fn to_html(&self) -> Result<String, Box<dyn Error>> {
        let planned_credits = self.planned_credits();
        let progress_percent = if self.total_credits == 0 {
            0
        } else {
            (self.completed_credits.saturating_mul(100) / self.total_credits).min(100)
        };
        let page = PlanHtml {
            export: self,
            planned_credits,
            progress_percent,
        };
        Ok(page.render()?)
    }
}

/// Longest content line in octets, excluding the line break
const ICAL_LINE_OCTETS: usize = 75;

/// Append a content line, folding it into 75-octet pieces
///
/// Continuation lines start with a single space, which counts toward their
/// length. Folds never split a UTF-8 sequence.
fn push_ical_line(ics: &mut String, line: &str) {
    let mut width = 0;
    for ch in line.chars() {
        if width + ch.len_utf8() > ICAL_LINE_OCTETS {
            ics.push_str("\r\n ");
            width = 1;
        }
        ics.push(ch);
        width += ch.len_utf8();
    }
    ics.push_str("\r\n");
}

fn uid_part(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

fn escape_ical_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            ';' => escaped.push_str("\\;"),
            ',' => escaped.push_str("\\,"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn export() -> PlanExport {
        PlanExport {
            student: "Jordan Lee".to_string(),
            major: "Computer Science".to_string(),
            expected_graduation: "Spring 2027".to_string(),
            total_credits: 124,
            completed_credits: 45,
            semesters: vec![
                ExportSemester {
                    name: "Fall 2025".to_string(),
                    season: Season::Fall,
                    year: 2025,
                    courses: vec![
                        ExportCourse {
                            id: "c1".to_string(),
                            code: "CSCE 3110".to_string(),
                            name: "Algorithms".to_string(),
                            credits: 3,
                        },
                        ExportCourse {
                            id: "c2".to_string(),
                            code: "CSCE 4110".to_string(),
                            name: "Design & Analysis of Algorithms".to_string(),
                            credits: 3,
                        },
                    ],
                },
                ExportSemester {
                    name: "Spring 2026".to_string(),
                    season: Season::Spring,
                    year: 2026,
                    courses: vec![ExportCourse {
                        id: "c3".to_string(),
                        code: "CSCE 3600".to_string(),
                        name: "Operating Systems, \"OS\"".to_string(),
                        credits: 3,
                    }],
                },
            ],
        }
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("CSV".parse::<ExportFormat>(), Ok(ExportFormat::Csv));
        assert_eq!("ics".parse::<ExportFormat>(), Ok(ExportFormat::Ical));
        assert!("xlsx".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::Ical.extension(), "ics");
    }

    #[test]
    fn test_csv_preview() {
        let csv = export().to_csv();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "Semester,Course Code,Course Name,Credits");
        assert_eq!(lines[1], "Fall 2025,CSCE 3110,\"Algorithms\",3");
        assert_eq!(lines[3], "Spring 2026,CSCE 3600,\"Operating Systems, \"\"OS\"\"\",3");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_ical_events() {
        let ics = export().to_ical();

        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(ics.ends_with("END:VCALENDAR\r\n"));
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 3);
        assert!(ics.contains("DTSTART;VALUE=DATE:20250825\r\n"));
        assert!(ics.contains("DTSTART;VALUE=DATE:20260115\r\n"));
        assert!(ics.contains("UID:2025-Fall-CSCE3110-c1@eagleplan"));
        assert!(ics.contains("SUMMARY:CSCE 3600 Operating Systems\\, \"OS\""));
    }

    #[test]
    fn test_ical_uids_distinct_for_repeated_course() {
        let mut export = export();
        let mut repeat = export.semesters[0].courses[0].clone();
        repeat.id = "c1-2".to_string();
        export.semesters[0].courses.push(repeat);

        let ics = export.to_ical();
        let uids: Vec<&str> = ics.lines().filter(|l| l.starts_with("UID:")).collect();
        let mut distinct = uids.clone();
        distinct.sort_unstable();
        distinct.dedup();

        assert_eq!(uids.len(), 4);
        assert_eq!(distinct.len(), 4);
    }

    #[test]
    fn test_ical_long_lines_folded() {
        let mut export = export();
        export.semesters[1].courses[0].name =
            "Special Topics in Computer Science: Verified Systems, Ünicode & Beyond\r\n".repeat(3);

        let ics = export.to_ical();
        for line in ics.split("\r\n") {
            assert!(line.len() <= 75, "line too long: {line:?}");
        }

        let unfolded = ics.replace("\r\n ", "");
        let summary = unfolded
            .lines()
            .find(|l| l.starts_with("SUMMARY:CSCE 3600"))
            .unwrap();
        assert!(!summary.contains('\r'));
        assert_eq!(summary.matches("Verified Systems\\, Ünicode & Beyond\\n").count(), 3);
    }

    #[test]
    fn test_html_escapes_names() {
        let html = export().to_html().unwrap();

        assert!(html.contains("Jordan Lee"));
        assert!(html.contains("Design &amp; Analysis of Algorithms"));
        assert!(html.contains("Fall 2025"));
    }

    #[test]
    fn test_planned_credits() {
        assert_eq!(export().planned_credits(), 9);
    }
}
