use crate::models::entry::LaborEntry;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// "All" or one specific value, as picked in the report filter form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// Build from raw user input: empty or "All" (any case) means no restriction.
    pub fn from_input(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => Selection::All,
            Some(v) if v.eq_ignore_ascii_case("all") => Selection::All,
            Some(v) => Selection::Only(v.to_string()),
        }
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Selection::All => None,
            Selection::Only(v) => Some(v.as_str()),
        }
    }

    pub fn accepts(&self, candidate: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(v) => v == candidate,
        }
    }
}

/// Immutable description of which entries a batch report covers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFilter {
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
    employee: Selection,
    job_type: Selection,
    text_search: Option<String>,
}

impl ReportFilter {
    pub fn builder() -> ReportFilterBuilder {
        ReportFilterBuilder::default()
    }

    pub fn date_from(&self) -> Option<NaiveDate> {
        self.date_from
    }

    pub fn date_to(&self) -> Option<NaiveDate> {
        self.date_to
    }

    pub fn employee(&self) -> &Selection {
        &self.employee
    }

    pub fn job_type(&self) -> &Selection {
        &self.job_type
    }

    pub fn text_search(&self) -> Option<&str> {
        self.text_search.as_deref()
    }

    /// In-memory equivalent of the SQL filter used by `SqliteSource`.
    pub fn matches(&self, entry: &LaborEntry) -> bool {
        if self.date_from.is_some_and(|from| entry.work_date < from) {
            return false;
        }
        if self.date_to.is_some_and(|to| entry.work_date > to) {
            return false;
        }
        if !self.employee.accepts(&entry.employee_name) || !self.job_type.accepts(&entry.job_type)
        {
            return false;
        }
        match &self.text_search {
            Some(needle) => entry
                .job_description
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            None => true,
        }
    }

    /// Human readable description printed under the summary title.
    pub fn describe(&self, first_day: Option<NaiveDate>, last_day: Option<NaiveDate>) -> String {
        let mut parts = Vec::new();
        if let Some(e) = self.employee.value() {
            parts.push(format!("Employee: {e}"));
        }
        if let Some(j) = self.job_type.value() {
            parts.push(format!("Job Type: {j}"));
        }
        if let Some(s) = &self.text_search {
            parts.push(format!("Search: {s}"));
        }
        let (from, to) = self.effective_bounds(first_day, last_day);
        parts.push(format!("Dates: {}", span_label(from, to)));
        parts.join(" • ")
    }

    /// Explicit bounds win; otherwise fall back to the first/last day present.
    pub fn effective_bounds(
        &self,
        first_day: Option<NaiveDate>,
        last_day: Option<NaiveDate>,
    ) -> (Option<NaiveDate>, Option<NaiveDate>) {
        (self.date_from.or(first_day), self.date_to.or(last_day))
    }
}

/// `"<from> to <to>"`, dropping the " to" part when there is no end.
pub(crate) fn span_label(from: Option<NaiveDate>, to: Option<NaiveDate>) -> String {
    let from = from.map(|d| d.to_string()).unwrap_or_default();
    match to {
        Some(to) => format!("{from} to {to}"),
        None => from,
    }
}

#[derive(Debug, Default)]
pub struct ReportFilterBuilder {
    inner: ReportFilter,
}

impl ReportFilterBuilder {
    pub fn date_from(mut self, d: Option<NaiveDate>) -> Self {
        self.inner.date_from = d;
        self
    }

    pub fn date_to(mut self, d: Option<NaiveDate>) -> Self {
        self.inner.date_to = d;
        self
    }

    pub fn employee(mut self, s: Selection) -> Self {
        self.inner.employee = s;
        self
    }

    pub fn job_type(mut self, s: Selection) -> Self {
        self.inner.job_type = s;
        self
    }

    pub fn text_search(mut self, s: Option<&str>) -> Self {
        self.inner.text_search = s
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        self
    }

    pub fn build(self) -> ReportFilter {
        self.inner
    }
}
