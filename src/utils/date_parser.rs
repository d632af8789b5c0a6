//! Lenient parsing of the date column.
//!
//! Snapshots from different cantons do not agree on a date format, so a list
//! of common layouts is tried in order. Ambiguous all-numeric forms are read
//! month-first whatever the separator; day-first only applies when the first
//! field cannot be a month.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{ProcessingError, Result};

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%Y%m%d",
    "%m/%d/%Y",
    "%m.%d.%Y",
    "%m-%d-%Y",
    "%d/%m/%Y",
    "%d.%m.%Y",
    "%d-%m-%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d-%b-%Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%MZ",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d.%m.%Y %H:%M",
];

/// Parse a calendar date from a human-readable string.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ProcessingError::InvalidDate(value.to_string()));
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(datetime.date());
        }
    }

    // RFC 3339 timestamps carry an offset; the calendar date as written is kept.
    if let Ok(datetime) = chrono::DateTime::parse_from_rfc3339(trimmed) {
        return Ok(datetime.date_naive());
    }

    Err(ProcessingError::InvalidDate(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_iso_dates() {
        assert_eq!(parse_date("2020-02-27").unwrap(), ymd(2020, 2, 27));
        assert_eq!(parse_date("  2020-02-27 ").unwrap(), ymd(2020, 2, 27));
        assert_eq!(parse_date("2020/02/27").unwrap(), ymd(2020, 2, 27));
        assert_eq!(parse_date("20200227").unwrap(), ymd(2020, 2, 27));
    }

    #[test]
    fn test_datetimes_keep_calendar_date() {
        assert_eq!(parse_date("2020-02-27T13:00").unwrap(), ymd(2020, 2, 27));
        assert_eq!(parse_date("2020-02-27 17:13:00").unwrap(), ymd(2020, 2, 27));
        assert_eq!(
            parse_date("2020-02-27T23:30:00+01:00").unwrap(),
            ymd(2020, 2, 27)
        );
    }

    #[test]
    fn test_regional_formats() {
        assert_eq!(parse_date("27.02.2020").unwrap(), ymd(2020, 2, 27));
        assert_eq!(parse_date("03/04/2020").unwrap(), ymd(2020, 3, 4));
        assert_eq!(parse_date("27 Feb 2020").unwrap(), ymd(2020, 2, 27));
        assert_eq!(parse_date("February 27, 2020").unwrap(), ymd(2020, 2, 27));
        assert_eq!(parse_date("Feb 27 2020").unwrap(), ymd(2020, 2, 27));
    }

    #[test]
    fn test_numeric_dates_are_month_first() {
        assert_eq!(parse_date("03-04-2020").unwrap(), ymd(2020, 3, 4));
        assert_eq!(parse_date("03.04.2020").unwrap(), ymd(2020, 3, 4));
        assert_eq!(parse_date("03/04/2020").unwrap(), ymd(2020, 3, 4));
        assert_eq!(parse_date("27-02-2020").unwrap(), ymd(2020, 2, 27));
        assert_eq!(parse_date("27/02/2020").unwrap(), ymd(2020, 2, 27));
    }

    #[test]
    fn test_short_utc_timestamp() {
        assert_eq!(parse_date("2020-02-27T13:00Z").unwrap(), ymd(2020, 2, 27));
    }

    #[test]
    fn test_unparseable() {
        assert!(matches!(
            parse_date("yesterday"),
            Err(ProcessingError::InvalidDate(v)) if v == "yesterday"
        ));
        assert!(parse_date("").is_err());
        assert!(parse_date("2020-02-30").is_err());
    }
}
