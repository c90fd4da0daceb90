//! Date normalisation.
//!
//! The backend serves dates in several shapes: change points are already
//! `YYYY-MM-DD`, but prices and events pass through its JSON encoder and come
//! out as HTTP dates (`Wed, 20 May 1987 00:00:00 GMT`). The source CSVs mix
//! `20-May-87` and `Apr 22, 2020`. Everything is reduced to a `NaiveDate` so
//! that alignment compares calendar days, never formatted strings.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Date-only layouts, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%b-%y", "%d-%b-%Y", "%b %d, %Y", "%Y/%m/%d"];

/// Date-time layouts without an offset, tried in order.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse any supported date representation into a calendar date.
///
/// Values carrying a UTC offset are converted to UTC before the date is taken.
/// Returns `None` for anything unrecognised.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    None
}

/// Strict `YYYY-MM-DD` parse used for user input.
pub fn parse_iso(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Chart label form of a date.
pub fn format_label(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
