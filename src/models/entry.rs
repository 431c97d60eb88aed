use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One employee's recorded work for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaborEntry {
    pub id: String,
    pub work_date: NaiveDate,
    pub employee_name: String,
    pub job_type: String,
    /// Free text, possibly multi-line.
    pub job_description: String,
    pub total_hours: f64,
    #[serde(default)]
    pub notes: String,
}

/// Longest job summary kept in header lines before it gets an ellipsis.
const JOB_SUMMARY_MAX_CHARS: usize = 42;

impl LaborEntry {
    /// First non-blank line of the job description, shortened for header lines.
    /// Some descriptions start with an empty line, so blank lines are skipped.
    pub fn job_summary(&self) -> String {
        let first = self
            .job_description
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or("");

        if first.chars().count() > JOB_SUMMARY_MAX_CHARS {
            let head: String = first.chars().take(JOB_SUMMARY_MAX_CHARS - 1).collect();
            format!("{head}…")
        } else {
            first.to_string()
        }
    }
}
