//! Date normalizer.
//!
//! # Responsibility
//! - Map relative keywords (`today`, `tomorrow`, `next week`) and free-form
//!   calendar input to canonical `YYYY-MM-DD` strings.
//! - Parse free-form timestamps and render them in canonical RFC 3339 form.
//!
//! # Invariants
//! - `normalize_date` never fails: unparseable input yields the date of `now`.
//! - `normalize_timestamp` never fails: unparseable input yields
//!   [`INVALID_TIMESTAMP`].
//! - Inputs without an explicit offset are interpreted as UTC.

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use log::debug;

/// Stored in place of a timestamp that could not be parsed.
pub const INVALID_TIMESTAMP: &str = "Invalid Date";

const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d";

const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    CANONICAL_DATE_FORMAT,
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%a, %B %d, %Y",
    "%a %B %d %Y",
];

/// Normalizes user date input to a canonical `YYYY-MM-DD` string.
///
/// Keywords are matched case-insensitively after trimming:
/// - `today` -> date of `now`
/// - `tomorrow` -> date of `now` + 1 day
/// - `next week` -> date of `now` + 7 days
///
/// Anything else is parsed as a date or timestamp. Unparseable input falls
/// back to the date of `now` without raising.
pub fn normalize_date(input: &str, now: DateTime<Utc>) -> String {
    let today = now.date_naive();
    let date = match input.trim().to_lowercase().as_str() {
        "today" => today,
        "tomorrow" => shift_days(today, 1),
        "next week" => shift_days(today, 7),
        _ => match parse_timestamp(input) {
            Some(parsed) => parsed.date_naive(),
            None => {
                debug!("event=date_normalize module=time status=fallback reason=unparseable");
                today
            }
        },
    };
    format_date(date)
}

/// Parses a free-form timestamp or date into a UTC instant.
///
/// Bare dates resolve to midnight UTC. Returns `None` for blank or
/// unrecognized input.
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(trimmed, format) {
            return Some(parsed.with_timezone(&Utc));
        }
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed.and_utc());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, format) {
            return parsed.and_hms_opt(0, 0, 0).map(|value| value.and_utc());
        }
    }

    None
}

/// Parses input and renders the canonical timestamp, or
/// [`INVALID_TIMESTAMP`] when the input cannot be parsed.
pub fn normalize_timestamp(input: &str) -> String {
    match parse_timestamp(input) {
        Some(parsed) => format_timestamp(parsed),
        None => {
            debug!("event=timestamp_normalize module=time status=invalid");
            INVALID_TIMESTAMP.to_string()
        }
    }
}

/// Renders an instant as RFC 3339 UTC with millisecond precision.
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Renders a calendar date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(CANONICAL_DATE_FORMAT).to_string()
}

/// Canonical date string for the calendar day of `now`.
pub fn today(now: DateTime<Utc>) -> String {
    format_date(now.date_naive())
}

/// Returns whether a stored timestamp falls on the given canonical date.
///
/// Unparseable timestamps never match.
pub fn timestamp_on_date(timestamp: &str, date: &str) -> bool {
    parse_timestamp(timestamp)
        .map(|instant| format_date(instant.date_naive()) == date)
        .unwrap_or(false)
}

fn shift_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::{
        normalize_date, normalize_timestamp, parse_timestamp, timestamp_on_date,
        INVALID_TIMESTAMP,
    };
    use chrono::{TimeZone, Utc};

    #[test]
    fn keywords_are_trimmed_and_case_insensitive() {
        let now = Utc.with_ymd_and_hms(2025, 10, 6, 23, 59, 0).unwrap();
        assert_eq!(normalize_date("  TODAY ", now), "2025-10-06");
        assert_eq!(normalize_date("Tomorrow", now), "2025-10-07");
        assert_eq!(normalize_date("next WEEK", now), "2025-10-13");
    }

    #[test]
    fn keywords_cross_month_and_year_boundaries() {
        let now = Utc.with_ymd_and_hms(2025, 12, 28, 0, 0, 0).unwrap();
        assert_eq!(normalize_date("tomorrow", now), "2025-12-29");
        assert_eq!(normalize_date("next week", now), "2026-01-04");
    }

    #[test]
    fn free_form_dates_are_normalized() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(normalize_date("2025-10-20", now), "2025-10-20");
        assert_eq!(normalize_date("2025/10/20", now), "2025-10-20");
        assert_eq!(normalize_date("10/20/2025", now), "2025-10-20");
        assert_eq!(normalize_date("October 20, 2025", now), "2025-10-20");
        assert_eq!(normalize_date("2025-10-20T22:15:00Z", now), "2025-10-20");
        assert_eq!(normalize_date("2025-10-20T23:30:00-02:00", now), "2025-10-21");
    }

    #[test]
    fn unparseable_dates_fall_back_to_now() {
        let now = Utc.with_ymd_and_hms(2025, 10, 6, 8, 0, 0).unwrap();
        assert_eq!(normalize_date("someday", now), "2025-10-06");
        assert_eq!(normalize_date("", now), "2025-10-06");
        assert_eq!(normalize_date("2025-13-45", now), "2025-10-06");
    }

    #[test]
    fn timestamps_render_with_millis_and_utc_suffix() {
        assert_eq!(
            normalize_timestamp("2025-10-06T14:00:00"),
            "2025-10-06T14:00:00.000Z"
        );
        assert_eq!(
            normalize_timestamp("2025-10-06 14:30"),
            "2025-10-06T14:30:00.000Z"
        );
        assert_eq!(
            normalize_timestamp("2025-10-06T14:00:00+02:00"),
            "2025-10-06T12:00:00.000Z"
        );
        assert_eq!(normalize_timestamp("2025-10-06"), "2025-10-06T00:00:00.000Z");
    }

    #[test]
    fn unparseable_timestamps_become_invalid_marker() {
        assert_eq!(normalize_timestamp("next tuesday-ish"), INVALID_TIMESTAMP);
        assert!(parse_timestamp(INVALID_TIMESTAMP).is_none());
        assert!(!timestamp_on_date(INVALID_TIMESTAMP, "2025-10-06"));
    }

    #[test]
    fn timestamp_on_date_compares_utc_calendar_day() {
        assert!(timestamp_on_date("2025-10-06T23:59:59.000Z", "2025-10-06"));
        assert!(!timestamp_on_date("2025-10-07T00:00:00.000Z", "2025-10-06"));
    }
}
