//! Date helper functions

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};

/// Naive date-time layouts accepted in front matter, read as UTC
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Date-only layouts, read as midnight UTC
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Moment.js tokens and their chrono equivalents, longest first
const MOMENT_TOKENS: &[(&str, &str)] = &[
    ("YYYY", "%Y"),
    ("YY", "%y"),
    ("MMMM", "%B"),
    ("MMM", "%b"),
    ("MM", "%m"),
    ("M", "%-m"),
    ("DDDD", "%j"),
    ("DD", "%d"),
    ("D", "%-d"),
    ("dddd", "%A"),
    ("ddd", "%a"),
    ("HH", "%H"),
    ("H", "%-H"),
    ("hh", "%I"),
    ("h", "%-I"),
    ("mm", "%M"),
    ("SSS", "%3f"),
    ("ss", "%S"),
    ("ZZ", "%z"),
    ("Z", "%:z"),
    ("A", "%p"),
];

/// Parse a post date into a comparable, offset-aware value.
///
/// RFC 3339 keeps its offset; naive values are taken as UTC so the result
/// does not depend on the machine's local timezone.
pub fn parse_date(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%z") {
        return Some(dt);
    }

    let utc = FixedOffset::east_opt(0)?;

    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(utc.from_utc_datetime(&naive));
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
        }
    }

    None
}

/// Format a date using a Moment.js-compatible format string
///
/// # Examples
/// ```ignore
/// format_date(&date, "DD MMMM YYYY") // -> "05 March 2024"
/// ```
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>, format: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format(&moment_to_chrono_format(format)).to_string()
}

/// Format a date in ISO 8601 / XML format, for `<time datetime>` attributes
pub fn date_xml<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

/// Convert a Moment.js format to a chrono format.
///
/// Text inside `[...]` is copied literally, and a bare `%` is escaped.
fn moment_to_chrono_format(format: &str) -> String {
    let mut result = String::with_capacity(format.len() * 2);
    let mut rest = format;

    'outer: while let Some(c) = rest.chars().next() {
        if c == '[' {
            if let Some(end) = rest.find(']') {
                push_literal(&mut result, &rest[1..end]);
                rest = &rest[end + 1..];
                continue;
            }
        }

        for (token, chrono_fmt) in MOMENT_TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                result.push_str(chrono_fmt);
                rest = tail;
                continue 'outer;
            }
        }

        push_literal(&mut result, &rest[..c.len_utf8()]);
        rest = &rest[c.len_utf8()..];
    }

    result
}

fn push_literal(out: &mut String, text: &str) {
    for c in text.chars() {
        if c == '%' {
            out.push_str("%%");
        } else {
            out.push(c);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_format_home_date() {
        let date = parse_date("2024-03-05").unwrap();
        assert_eq!(format_date(&date, "DD MMMM YYYY"), "05 March 2024");
        assert_eq!(format_date(&date, "YYYY/MM/DD"), "2024/03/05");
    }

    #[test]
    fn test_moment_to_chrono() {
        assert_eq!(moment_to_chrono_format("DD MMMM YYYY"), "%d %B %Y");
        assert_eq!(moment_to_chrono_format("HH:mm:ss"), "%H:%M:%S");
        assert_eq!(moment_to_chrono_format("[Day] D"), "Day %-d");
        assert_eq!(moment_to_chrono_format("100%"), "100%%");
    }

    #[test]
    fn test_parse_naive_formats_as_utc() {
        let dt = parse_date("2024-01-15 10:30:00").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 0);
        assert_eq!(date_xml(&dt), "2024-01-15T10:30:00+00:00");

        let dt = parse_date("2024/01/15").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 1, 15));

        assert!(parse_date("2024-01-15T10:30:00.250").is_some());
        assert!(parse_date("2024-01-15 10:30").is_some());
    }

    #[test]
    fn test_parse_keeps_offset() {
        let dt = parse_date("2024-03-01T23:30:00+08:00").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 8 * 3600);
        assert_eq!(format_date(&dt, "DD MMMM YYYY"), "01 March 2024");

        let earlier = parse_date("2024-03-01T20:00:00Z").unwrap();
        assert!(dt < earlier);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_date("").is_none());
        assert!(parse_date("next tuesday").is_none());
        assert!(parse_date("2024-13-40").is_none());
    }
}
