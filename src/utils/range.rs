use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

fn invalid(msg: &str) -> AppError {
    AppError::InvalidRange(msg.to_string())
}

/// Parse `--range` (year / month / day / interval) into inclusive bounds.
///
/// Supports:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - YYYY:YYYY
/// - YYYY-MM:YYYY-MM
/// - YYYY-MM-DD:YYYY-MM-DD
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let (start, end) = match r.split_once(':') {
        Some((s, e)) => {
            let (s, e) = (s.trim(), e.trim());
            if s.len() != e.len() {
                return Err(invalid("start and end must have same format"));
            }
            (period_bounds(s)?.0, period_bounds(e)?.1)
        }
        None => period_bounds(r.trim())?,
    };

    if start > end {
        return Err(invalid("start is after end"));
    }
    Ok((start, end))
}

/// First and last day of a single period.
fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    if !p.is_ascii() {
        return Err(invalid("unsupported --range format"));
    }
    match p.len() {
        // YYYY
        4 => {
            let y: i32 = p.parse().map_err(|_| invalid("invalid year"))?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(|| invalid("invalid start date"))?;
            let d2 = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(|| invalid("invalid end date"))?;
            Ok((d1, d2))
        }
        // YYYY-MM
        7 => {
            let y: i32 = p[0..4].parse().map_err(|_| invalid("invalid year"))?;
            let m: u32 = p[5..7].parse().map_err(|_| invalid("invalid month"))?;
            let last = month_last_day(y, m).ok_or_else(|| invalid("invalid month"))?;

            let d1 = NaiveDate::from_ymd_opt(y, m, 1).ok_or_else(|| invalid("invalid start date"))?;
            let d2 = NaiveDate::from_ymd_opt(y, m, last).ok_or_else(|| invalid("invalid end date"))?;
            Ok((d1, d2))
        }
        // YYYY-MM-DD
        10 => {
            let d = NaiveDate::parse_from_str(p, "%Y-%m-%d").map_err(|_| invalid("invalid date"))?;
            Ok((d, d))
        }
        _ => Err(invalid("unsupported --range format")),
    }
}

fn month_last_day(y: i32, m: u32) -> Option<u32> {
    match m {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 => {
            let leap = (y % 4 == 0 && y % 100 != 0) || (y % 400 == 0);
            Some(if leap { 29 } else { 28 })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn single_periods() {
        assert_eq!(parse_range("2024").unwrap(), (d("2024-01-01"), d("2024-12-31")));
        assert_eq!(parse_range("2024-02").unwrap(), (d("2024-02-01"), d("2024-02-29")));
        assert_eq!(parse_range("2025-02").unwrap().1, d("2025-02-28"));
        assert_eq!(parse_range("2025-07-04").unwrap(), (d("2025-07-04"), d("2025-07-04")));
    }

    #[test]
    fn intervals() {
        assert_eq!(
            parse_range("2025-01:2025-03").unwrap(),
            (d("2025-01-01"), d("2025-03-31"))
        );
        assert_eq!(
            parse_range("2025-06-02:2025-06-08").unwrap(),
            (d("2025-06-02"), d("2025-06-08"))
        );
    }

    #[test]
    fn bad_ranges() {
        assert!(matches!(parse_range("2025:2025-03"), Err(AppError::InvalidRange(_))));
        assert!(matches!(parse_range("2025-13"), Err(AppError::InvalidRange(_))));
        assert!(matches!(parse_range("2025-05:2025-01"), Err(AppError::InvalidRange(_))));
        assert!(parse_range("yesterday").is_err());
    }
}
