//! Date range parsing for `--from` / `--to`.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use crate::search::DateRange;

/// Which end of a range a date string describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Start of the day.
    Start,
    /// Last millisecond of the day.
    End,
}

/// Parses a single date.
///
/// Accepts:
/// - Relative: "7d", "30d" (days ago from now)
/// - Absolute: "2024-01-15" (YYYY-MM-DD format, UTC)
pub fn parse_date(s: &str, bound: Bound) -> Result<DateTime<Utc>, String> {
    let s = s.trim();

    // Try relative format: Nd (e.g., "7d", "30d")
    if let Some(days_str) = s.strip_suffix('d') {
        let days: i64 = days_str
            .parse()
            .map_err(|_| format!("invalid relative date: {}", s))?;
        if days < 0 {
            return Err(format!("days must be non-negative: {}", s));
        }
        return Ok(Utc::now() - Duration::days(days));
    }

    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("invalid date format (expected YYYY-MM-DD or Nd): {}", s))?;

    let naive = match bound {
        Bound::Start => date.and_hms_opt(0, 0, 0),
        Bound::End => date.and_hms_milli_opt(23, 59, 59, 999),
    }
    .ok_or_else(|| format!("invalid date: {}", s))?;

    Ok(Utc.from_utc_datetime(&naive))
}

/// Builds an inclusive creation-date range from optional `--from` / `--to`.
///
/// Returns `None` when neither bound is given. A missing bound is open.
pub fn date_range(from: Option<&str>, to: Option<&str>) -> Result<Option<DateRange>, String> {
    if from.is_none() && to.is_none() {
        return Ok(None);
    }

    let start = match from {
        Some(s) => parse_date(s, Bound::Start)?,
        None => DateTime::<Utc>::MIN_UTC,
    };
    let end = match to {
        Some(s) => parse_date(s, Bound::End)?,
        None => DateTime::<Utc>::MAX_UTC,
    };

    if start > end {
        return Err("--from is after --to".to_string());
    }
    Ok(Some(DateRange::new(start, end)))
}
