//! # Upload-date formatting
//!
//! Posts show their upload date as `"<Month> <n>, <Year>"`, e.g.
//! `"October 2, 2019"`.
//!
//! Note that `<n>` is the **day of the week** counted from Sunday = 0, not
//! the day of the month. That is what the page has always displayed; it is
//! almost certainly a mistake, but changing it would change every rendered
//! date, so it stays until the product decides what the number should be.
//!
//! Dates are evaluated in the offset they carry: a `GMT` string from the
//! backend is formatted in UTC, a `+09:00` string in that zone.

use chrono::{DateTime, Datelike, FixedOffset, TimeZone};

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// English name of a 1-based month number; `""` outside 1..=12.
pub fn month_name(month: u32) -> &'static str {
    match month {
        1..=12 => MONTHS[(month - 1) as usize],
        _ => "",
    }
}

/// Format a date as `"<Month> <weekday number>, <Year>"`.
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String {
    format_parts(
        date.month(),
        date.weekday().num_days_from_sunday(),
        date.year(),
    )
}

/// Parse a backend date string and format it, or `None` if it doesn't parse.
///
/// Accepts RFC 2822 (what the backend's JSON encoder emits for datetimes)
/// and RFC 3339.
pub fn format_date_str(s: &str) -> Option<String> {
    parse_date(s).map(|date| format_date(&date))
}

fn parse_date(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();
    DateTime::parse_from_rfc2822(s)
        .or_else(|_| DateTime::parse_from_rfc3339(s))
        .ok()
}

fn format_parts(month: u32, day: u32, year: i32) -> String {
    format!("{} {}, {}", month_name(month), day, year)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_all_month_names() {
        let expected = [
            "January", "February", "March", "April", "May", "June", "July", "August",
            "September", "October", "November", "December",
        ];
        for (i, name) in expected.iter().enumerate() {
            assert_eq!(month_name(i as u32 + 1), *name);
        }
    }

    #[test]
    fn test_unknown_month_is_empty() {
        assert_eq!(month_name(0), "");
        assert_eq!(month_name(13), "");
        assert_eq!(format_parts(13, 3, 2020), " 3, 2020");
    }

    #[test]
    fn test_day_is_weekday_number() {
        // 2024-03-10 is a Sunday, 2024-03-16 a Saturday.
        let sunday = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let saturday = Utc.with_ymd_and_hms(2024, 3, 16, 12, 0, 0).unwrap();
        assert_eq!(format_date(&sunday), "March 0, 2024");
        assert_eq!(format_date(&saturday), "March 6, 2024");
    }

    #[test]
    fn test_rfc2822_string() {
        assert_eq!(
            format_date_str("Wed, 01 Jan 2020 00:00:00 GMT").as_deref(),
            Some("January 3, 2020")
        );
    }

    #[test]
    fn test_rfc3339_uses_own_offset() {
        // Saturday in UTC, already Sunday in +09:00.
        assert_eq!(
            format_date_str("2024-03-16T20:00:00+00:00").as_deref(),
            Some("March 6, 2024")
        );
        assert_eq!(
            format_date_str("2024-03-17T05:00:00+09:00").as_deref(),
            Some("March 0, 2024")
        );
    }

    #[test]
    fn test_unparseable_string() {
        assert!(format_date_str("").is_none());
        assert!(format_date_str("yesterday").is_none());
    }
}
