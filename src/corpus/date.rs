//! Publication date parsing for the PUBLISHED header.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    static ref DAY_MONTH_YEAR: Regex =
        Regex::new(r"^(\d{1,2})\s+([A-Za-z]+)\s+(\d{4})$").expect("valid date regex");
    static ref MONTHS: HashMap<&'static str, u32> = {
        [
            "january",
            "february",
            "march",
            "april",
            "may",
            "june",
            "july",
            "august",
            "september",
            "october",
            "november",
            "december",
        ]
        .iter()
        .enumerate()
        .flat_map(|(idx, &name)| [(name, idx as u32 + 1), (&name[..3], idx as u32 + 1)])
        .chain([("sept", 9)])
        .collect()
    };
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%B %d, %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%b %d %Y",
];

/// Parse a PUBLISHED value.
///
/// Generic machine formats are tried first (RFC 3339, RFC 2822, ISO style
/// date-times, `YYYY-MM-DD`, `YYYY/MM/DD` and US style `Month DD, YYYY`),
/// then `DD MonthName YYYY`, where the month may also be abbreviated.
/// Offsets are normalized to UTC; date-only values land on midnight.
pub fn parse_published(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    parse_machine_date(value).or_else(|| parse_day_month_year(value))
}

fn parse_machine_date(value: &str) -> Option<NaiveDateTime> {
    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Some(date.naive_utc());
    }

    if let Ok(date) = DateTime::parse_from_rfc2822(value) {
        return Some(date.naive_utc());
    }

    if let Ok(date) = DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%z") {
        return Some(date.naive_utc());
    }

    for format in DATETIME_FORMATS {
        if let Ok(date) = NaiveDateTime::parse_from_str(value, format) {
            return Some(date);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    None
}

/// `DD MonthName YYYY` with a case-insensitive month lookup. Three-letter
/// abbreviations and `Sept` are accepted.
fn parse_day_month_year(value: &str) -> Option<NaiveDateTime> {
    let caps = DAY_MONTH_YEAR.captures(value)?;
    let day: u32 = caps[1].parse().ok()?;
    let month = *MONTHS.get(caps[2].to_lowercase().as_str())?;
    let year: i32 = caps[3].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDateTime {
        ymd_hms(y, m, d, 0, 0, 0)
    }

    fn ymd_hms(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_machine_formats() {
        assert_eq!(parse_published("2014/01/19"), Some(ymd(2014, 1, 19)));
        assert_eq!(parse_published("2014-01-19"), Some(ymd(2014, 1, 19)));
        assert_eq!(
            parse_published("2014-01-19T10:30:00Z"),
            Some(ymd_hms(2014, 1, 19, 10, 30, 0))
        );
        assert_eq!(
            parse_published("2014-01-19T10:30:00+02:00"),
            Some(ymd_hms(2014, 1, 19, 8, 30, 0))
        );
        assert_eq!(
            parse_published("Sun, 19 Jan 2014 12:00:00 +0000"),
            Some(ymd_hms(2014, 1, 19, 12, 0, 0))
        );
        assert_eq!(
            parse_published("2014/01/19 17:45"),
            Some(ymd_hms(2014, 1, 19, 17, 45, 0))
        );
        assert_eq!(parse_published("January 19, 2014"), Some(ymd(2014, 1, 19)));
        assert_eq!(parse_published("January 19 2014"), Some(ymd(2014, 1, 19)));
        assert_eq!(parse_published("Jan 19, 2014"), Some(ymd(2014, 1, 19)));
        assert_eq!(parse_published("Jan 19 2014"), Some(ymd(2014, 1, 19)));
        assert_eq!(parse_published("Dec 5, 2013"), Some(ymd(2013, 12, 5)));
    }

    #[test]
    fn test_day_month_year() {
        assert_eq!(parse_published("19 January 2014"), Some(ymd(2014, 1, 19)));
        assert_eq!(parse_published("5 MARCH 2013"), Some(ymd(2013, 3, 5)));
        assert_eq!(parse_published("  07   december   1998 "), Some(ymd(1998, 12, 7)));
        assert_eq!(parse_published("19 Jan 2014"), Some(ymd(2014, 1, 19)));
        assert_eq!(parse_published("3 SEP 2013"), Some(ymd(2013, 9, 3)));
        assert_eq!(parse_published("3 Sept 2013"), Some(ymd(2013, 9, 3)));
    }

    #[test]
    fn test_invalid_dates() {
        assert_eq!(parse_published(""), None);
        assert_eq!(parse_published("yesterday"), None);
        assert_eq!(parse_published("19 Janvier 2014"), None);
        assert_eq!(parse_published("19 Ja 2014"), None);
        assert_eq!(parse_published("Foo 19, 2014"), None);
        assert_eq!(parse_published("31 February 2014"), None);
        assert_eq!(parse_published("2014/13/01"), None);
        assert_eq!(parse_published("19 January 14"), None);
    }
}
