//! Date helpers: today's date, report date arguments and period ranges.

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, Duration, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Parse a `--date` argument relative to `base`.
///
/// Accepts `YYYY-MM-DD`, `today`, `yesterday` and day offsets such as
/// `-1` or `+2`.
pub fn parse_date_arg(s: &str, base: NaiveDate) -> AppResult<NaiveDate> {
    let t = s.trim();
    match t.to_lowercase().as_str() {
        "today" => return Ok(base),
        "yesterday" => return Ok(base - Duration::days(1)),
        _ => {}
    }

    if (t.starts_with('+') || t.starts_with('-'))
        && let Ok(offset) = t.parse::<i64>()
    {
        return Duration::try_days(offset)
            .and_then(|delta| base.checked_add_signed(delta))
            .ok_or_else(|| AppError::InvalidDate(t.to_string()));
    }

    parse_date(t).ok_or_else(|| AppError::InvalidDate(t.to_string()))
}

/// Parse a period or range expression into inclusive bounds.
///
/// Supports:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - YYYY:YYYY
/// - YYYY-MM:YYYY-MM
/// - YYYY-MM-DD:YYYY-MM-DD
pub fn parse_period(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    if let Some((start_raw, end_raw)) = p.split_once(':') {
        let start = start_raw.trim();
        let end = end_raw.trim();

        if start.len() != end.len() {
            return Err(AppError::InvalidDate(format!(
                "{p}: start and end must have the same format"
            )));
        }

        let (from, _) = single_period(start)?;
        let (_, to) = single_period(end)?;

        if from > to {
            return Err(AppError::InvalidDate(format!("{p}: start is after end")));
        }
        return Ok((from, to));
    }

    single_period(p.trim())
}

fn single_period(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let invalid = || AppError::InvalidDate(p.to_string());

    match p.len() {
        // YYYY
        4 => {
            let y: i32 = p.parse().map_err(|_| invalid())?;
            let from = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(invalid)?;
            let to = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(invalid)?;
            Ok((from, to))
        }
        // YYYY-MM
        7 => {
            let from = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d")
                .map_err(|_| invalid())?;
            Ok((from, last_day_of_month(from)))
        }
        // YYYY-MM-DD
        10 => {
            let d = parse_date(p).ok_or_else(invalid)?;
            Ok((d, d))
        }
        _ => Err(invalid()),
    }
}

fn last_day_of_month(first: NaiveDate) -> NaiveDate {
    let (y, m) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn date_arguments() {
        let base = d(2025, 3, 1);
        assert_eq!(parse_date_arg("today", base).unwrap(), base);
        assert_eq!(parse_date_arg("yesterday", base).unwrap(), d(2025, 2, 28));
        assert_eq!(parse_date_arg("+2", base).unwrap(), d(2025, 3, 3));
        assert_eq!(parse_date_arg("-1", base).unwrap(), d(2025, 2, 28));
        assert_eq!(parse_date_arg("2024-12-24", base).unwrap(), d(2024, 12, 24));
        assert!(parse_date_arg("24/12/2024", base).is_err());
        assert!(matches!(
            parse_date_arg("+999999999999999", base),
            Err(AppError::InvalidDate(_))
        ));
        assert!(matches!(
            parse_date_arg("-999999999999999", base),
            Err(AppError::InvalidDate(_))
        ));
    }

    #[test]
    fn periods() {
        assert_eq!(parse_period("2024").unwrap(), (d(2024, 1, 1), d(2024, 12, 31)));
        assert_eq!(parse_period("2024-02").unwrap(), (d(2024, 2, 1), d(2024, 2, 29)));
        assert_eq!(parse_period("2025-12").unwrap(), (d(2025, 12, 1), d(2025, 12, 31)));
        assert_eq!(
            parse_period("2025-06:2025-08").unwrap(),
            (d(2025, 6, 1), d(2025, 8, 31))
        );
        assert_eq!(
            parse_period("2025-06-03:2025-06-09").unwrap(),
            (d(2025, 6, 3), d(2025, 6, 9))
        );
        assert!(parse_period("2025:2025-06").is_err());
        assert!(parse_period("2025-09:2025-01").is_err());
        assert!(parse_period("June").is_err());
    }
}
