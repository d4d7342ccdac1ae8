//! Transcript import
//!
//! Uploads are classified by file name and MIME type. PDF transcripts are
//! recognized but their contents are not extracted; CSV exports are parsed
//! into [`TranscriptEntry`] rows.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

/// Grades that do not count as completing a course
const NON_COMPLETING_GRADES: [&str; 4] = ["IP", "W", "F", "I"];

/// Grade marking a course currently being taken
const IN_PROGRESS_GRADE: &str = "IP";

/// Kind of uploaded transcript file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    /// PDF transcript
    Pdf,
    /// CSV transcript export
    Csv,
    /// Anything else
    Unsupported,
}

impl UploadKind {
    /// Classify an upload by file name and optional MIME type
    #[must_use]
    pub fn detect(file_name: &str, mime: Option<&str>) -> Self {
        let name = file_name.to_ascii_lowercase();
        let mime = mime.map(str::to_ascii_lowercase);

        if mime.as_deref() == Some("application/pdf") || name.ends_with(".pdf") {
            Self::Pdf
        } else if mime.as_deref() == Some("text/csv") || name.ends_with(".csv") {
            Self::Csv
        } else {
            Self::Unsupported
        }
    }
}

/// Errors raised while importing a transcript
#[derive(Debug)]
pub enum TranscriptError {
    /// File could not be read
    Io(std::io::Error),
    /// Upload kind cannot be parsed
    UnsupportedUpload(String),
    /// Header row is missing a required column
    MissingColumn(&'static str),
    /// A data row is malformed
    InvalidRow {
        /// 1-based line number
        line: usize,
        /// What was wrong
        reason: String,
    },
}

impl fmt::Display for TranscriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "Failed to read transcript: {e}"),
            Self::UnsupportedUpload(msg) => write!(f, "{msg}"),
            Self::MissingColumn(col) => write!(f, "Transcript header is missing '{col}'"),
            Self::InvalidRow { line, reason } => write!(f, "Line {line}: {reason}"),
        }
    }
}

impl std::error::Error for TranscriptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TranscriptError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// A single course taken by the student
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    /// Course code
    pub code: String,
    /// Course name
    pub name: String,
    /// Credit hours
    pub credits: u32,
    /// Letter grade, `IP` when in progress
    pub grade: String,
    /// Term taken (e.g., "Fall 2023")
    pub semester: String,
}

impl TranscriptEntry {
    /// Whether the grade completes the course
    #[must_use]
    pub fn is_completed(&self) -> bool {
        let grade = self.grade.trim().to_ascii_uppercase();
        !grade.is_empty() && !NON_COMPLETING_GRADES.contains(&grade.as_str())
    }

    /// Whether the course is currently being taken
    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.grade.trim().eq_ignore_ascii_case(IN_PROGRESS_GRADE)
    }
}

/// Parsed transcript
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    /// Entries in file order
    pub entries: Vec<TranscriptEntry>,
}

impl Transcript {
    /// Sum of credits over all entries
    #[must_use]
    pub fn total_credits(&self) -> u32 {
        self.entries
            .iter()
            .map(|e| e.credits)
            .fold(0, u32::saturating_add)
    }

    /// Sum of credits over completed entries
    #[must_use]
    pub fn completed_credits(&self) -> u32 {
        self.entries
            .iter()
            .filter(|e| e.is_completed())
            .map(|e| e.credits)
            .fold(0, u32::saturating_add)
    }

    /// Codes of completed courses
    pub fn completed_codes(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|e| e.is_completed())
            .map(|e| e.code.as_str())
    }

    /// Codes of in-progress courses
    pub fn in_progress_codes(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|e| e.is_in_progress())
            .map(|e| e.code.as_str())
    }
}

/// Load a transcript from disk
///
/// # Errors
/// Returns an error for unreadable files, PDF or unknown uploads, and
/// malformed CSV.
pub fn load_transcript<P: AsRef<Path>>(path: P) -> Result<Transcript, TranscriptError> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    match UploadKind::detect(file_name, None) {
        UploadKind::Csv => parse_transcript_csv(&fs::read_to_string(path)?),
        UploadKind::Pdf => Err(TranscriptError::UnsupportedUpload(format!(
            "PDF transcript '{file_name}' accepted, but PDF content extraction is not supported; export it to CSV"
        ))),
        UploadKind::Unsupported => Err(TranscriptError::UnsupportedUpload(format!(
            "Unsupported transcript file '{file_name}'; expected .pdf or .csv"
        ))),
    }
}

/// Parse a CSV transcript
///
/// The header must contain `Code`, `Name`, `Credits`, `Grade` and `Semester`
/// columns in any order. Blank lines are skipped.
///
/// # Errors
/// Returns an error if a column is missing or a row is malformed.
pub fn parse_transcript_csv(content: &str) -> Result<Transcript, TranscriptError> {
    let mut lines = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((_, header_line)) = lines.next() else {
        return Ok(Transcript::default());
    };

    let columns: HashMap<String, usize> = split_csv_line(header_line)
        .into_iter()
        .enumerate()
        .map(|(idx, h)| (h.to_ascii_lowercase(), idx))
        .collect();

    let column = |name: &'static str| {
        columns
            .get(&name.to_ascii_lowercase())
            .copied()
            .ok_or(TranscriptError::MissingColumn(name))
    };
    let code_idx = column("Code")?;
    let name_idx = column("Name")?;
    let credits_idx = column("Credits")?;
    let grade_idx = column("Grade")?;
    let semester_idx = column("Semester")?;

    let mut transcript = Transcript::default();
    for (line_idx, line) in lines {
        let line_no = line_idx + 1;
        let fields = split_csv_line(line);
        let field = |idx: usize| fields.get(idx).map_or("", String::as_str);

        let code = field(code_idx);
        if code.is_empty() {
            return Err(TranscriptError::InvalidRow {
                line: line_no,
                reason: "missing course code".to_string(),
            });
        }

        let credits = field(credits_idx)
            .parse::<u32>()
            .ok()
            .filter(|c| *c > 0)
            .ok_or_else(|| TranscriptError::InvalidRow {
                line: line_no,
                reason: format!("invalid credits '{}' for {code}", field(credits_idx)),
            })?;

        transcript.entries.push(TranscriptEntry {
            code: code.to_string(),
            name: field(name_idx).to_string(),
            credits,
            grade: field(grade_idx).to_string(),
            semester: field(semester_idx).to_string(),
        });
    }

    Ok(transcript)
}

/// Split a CSV line into trimmed fields, honoring double-quoted fields
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Code,Name,Credits,Grade,Semester
CSCE 1030,Computer Science I,3,A,Fall 2023
MATH 1710,\"Calculus I, Honors\",4,B+,Fall 2023

CSCE 1040,Computer Science II,3,W,Spring 2024
CSCE 2100,Data Structures,3,IP,Fall 2024
";

    #[test]
    fn test_detect_upload_kind() {
        assert_eq!(UploadKind::detect("transcript.PDF", None), UploadKind::Pdf);
        assert_eq!(
            UploadKind::detect("blob", Some("application/pdf")),
            UploadKind::Pdf
        );
        assert_eq!(UploadKind::detect("grades.csv", None), UploadKind::Csv);
        assert_eq!(UploadKind::detect("notes.txt", Some("text/plain")), UploadKind::Unsupported);
    }

    #[test]
    fn test_split_csv_line() {
        assert_eq!(
            split_csv_line("a, \"b, c\" ,\"say \"\"hi\"\"\""),
            vec!["a", "b, c", "say \"hi\""]
        );
    }

    #[test]
    fn test_parse_transcript() {
        let transcript = parse_transcript_csv(SAMPLE).unwrap();

        assert_eq!(transcript.entries.len(), 4);
        assert_eq!(transcript.entries[1].name, "Calculus I, Honors");
        assert_eq!(transcript.total_credits(), 13);
        assert_eq!(transcript.completed_credits(), 7);
        assert_eq!(
            transcript.completed_codes().collect::<Vec<_>>(),
            vec!["CSCE 1030", "MATH 1710"]
        );
        assert_eq!(
            transcript.in_progress_codes().collect::<Vec<_>>(),
            vec!["CSCE 2100"]
        );
    }

    #[test]
    fn test_columns_in_any_order() {
        let csv = "semester,grade,credits,name,code\nFall 2023,A,3,Ethics,PHIL 1800\n";
        let transcript = parse_transcript_csv(csv).unwrap();
        assert_eq!(transcript.entries[0].code, "PHIL 1800");
        assert_eq!(transcript.entries[0].credits, 3);
    }

    #[test]
    fn test_missing_column() {
        let err = parse_transcript_csv("Code,Name,Credits,Semester\n").unwrap_err();
        assert!(matches!(err, TranscriptError::MissingColumn("Grade")));
    }

    #[test]
    fn test_invalid_credits_reports_line() {
        let csv = "Code,Name,Credits,Grade,Semester\nCSCE 1030,CS I,zero,A,Fall 2023\n";
        let err = parse_transcript_csv(csv).unwrap_err();
        match err {
            TranscriptError::InvalidRow { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_transcript_csv("").unwrap().entries.is_empty());
    }
}
