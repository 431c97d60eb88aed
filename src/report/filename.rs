//! Suggested download names for generated reports.

use crate::models::filter::span_label;
use crate::models::{LaborEntry, ReportBatch};
use regex::Regex;
use std::sync::LazyLock;

static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9 _.\-]").expect("valid filename pattern"));

pub const EMPTY_BATCH: &str = "Timesheets.pdf";
const BATCH_MAX_CHARS: usize = 140;
const ENTRY_MAX_CHARS: usize = 120;

/// Replace anything outside `[A-Za-z0-9 _.-]` with `_` and cap the length.
pub fn sanitize(name: &str, max_chars: usize) -> String {
    UNSAFE_CHARS
        .replace_all(name, "_")
        .chars()
        .take(max_chars)
        .collect()
}

/// `"<employee|Timesheets> Timesheet - <from> to <to>.pdf"`
pub fn batch_filename(batch: &ReportBatch) -> String {
    if batch.is_empty() {
        return EMPTY_BATCH.to_string();
    }
    let who = batch.filter.employee().value().unwrap_or("Timesheets");
    let (from, to) = batch
        .filter
        .effective_bounds(batch.first_day(), batch.last_day());
    sanitize(
        &format!("{who} Timesheet - {}.pdf", span_label(from, to)),
        BATCH_MAX_CHARS,
    )
}

/// `"<employee> Timesheet - <date>.pdf"`
pub fn entry_filename(entry: &LaborEntry) -> String {
    sanitize(
        &format!("{} Timesheet - {}.pdf", entry.employee_name, entry.work_date),
        ENTRY_MAX_CHARS,
    )
}

/// `"payroll_<from>_to_<to>.csv"`
pub fn payroll_filename(from: chrono::NaiveDate, to: chrono::NaiveDate) -> String {
    format!("payroll_{from}_to_{to}.csv")
}
