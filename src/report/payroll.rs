//! Payroll export: labour hours per employee per pay week.

use crate::errors::{AppError, AppResult};
use crate::models::LaborEntry;
use crate::report::aggregate::finite_or_zero;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use csv::Writer;
use std::collections::BTreeMap;
use std::io::Write;

#[derive(Debug, Clone, PartialEq)]
pub struct PayrollRow {
    pub week_start: NaiveDate,
    pub employee_name: String,
    pub total_hours: f64,
}

/// First day of the pay week containing `date`.
pub fn week_start(date: NaiveDate, first_day: Weekday) -> NaiveDate {
    let back = (date.weekday().num_days_from_monday() + 7 - first_day.num_days_from_monday()) % 7;
    date - Duration::days(i64::from(back))
}

/// Parse a weekday such as `Thu` or `thursday`.
pub fn parse_weekday(raw: &str) -> AppResult<Weekday> {
    raw.trim()
        .parse::<Weekday>()
        .map_err(|_| AppError::Config(format!("invalid pay week start: '{raw}'")))
}

/// Group entries by (pay week, employee), sorted by week then employee.
pub fn payroll_rows(entries: &[LaborEntry], first_day: Weekday) -> Vec<PayrollRow> {
    let mut map: BTreeMap<(NaiveDate, String), f64> = BTreeMap::new();
    for e in entries {
        let key = (week_start(e.work_date, first_day), e.employee_name.trim().to_string());
        *map.entry(key).or_default() += finite_or_zero(e.total_hours);
    }
    map.into_iter()
        .map(|((week_start, employee_name), total_hours)| PayrollRow {
            week_start,
            employee_name,
            total_hours,
        })
        .collect()
}

/// Write `week_start,employee_name,total_hours` rows, hours with two decimals.
pub fn write_payroll_csv<W: Write>(out: W, rows: &[PayrollRow]) -> AppResult<()> {
    let mut wtr = Writer::from_writer(out);
    wtr.write_record(["week_start", "employee_name", "total_hours"])?;

    for r in rows {
        wtr.write_record(&[
            r.week_start.format("%Y-%m-%d").to_string(),
            r.employee_name.clone(),
            format!("{:.2}", r.total_hours),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
