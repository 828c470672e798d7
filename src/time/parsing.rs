//! Utility functions for parsing time/date/offset strings into chrono types.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use regex::Regex;
use std::sync::OnceLock;

static RE_OFFSET: OnceLock<Regex> = OnceLock::new();

/// Parses a naive datetime string commonly found in EXIF (YYYY:MM:DD HH:MM:SS[.fff]).
///
/// A trailing offset (`+03:00`, as written in the composite `SubSec*` tags) is
/// accepted and dropped, keeping the wall-clock time the camera recorded.
pub fn parse_naive(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    let formats = [
        "%Y:%m:%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y:%m:%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
    ];

    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    parse_datetime_offset(s).map(|dt| dt.naive_local())
}

/// Parses a datetime string with a timezone offset (e.g. `2021:07:10 12:31:13.45+03:00`).
pub fn parse_datetime_offset(s: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(s, "%Y:%m:%d %H:%M:%S%.f%:z")
        .ok()
        .or_else(|| DateTime::parse_from_str(s, "%Y:%m:%d %H:%M:%S%z").ok())
        .or_else(|| DateTime::parse_from_rfc3339(s).ok())
}

/// Parses a track log `<time>` value.
///
/// Track loggers write ISO 8601 in UTC (`2021-07-10T07:31:13.000Z`). Values carrying
/// an explicit offset are converted to UTC; values without any zone designator are
/// taken as UTC.
pub fn parse_track_time(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    let formats = [
        "%Y-%m-%dT%H:%M:%S%.fZ",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
    ];
    formats
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Parses an offset string like "+02:00", "-0500", or "Z" into offset seconds.
pub fn parse_offset_string(offset_str: &str) -> Option<i32> {
    let offset_str = offset_str.trim();
    if offset_str == "Z" {
        return Some(0);
    }
    let re_offset = RE_OFFSET.get_or_init(|| Regex::new(r"^([+-])(\d{2}):?(\d{2})$").unwrap());
    let caps = re_offset.captures(offset_str)?;
    let sign = if caps.get(1)?.as_str() == "-" { -1 } else { 1 };
    let hours = caps.get(2)?.as_str().parse::<i32>().ok()?;
    let minutes = caps.get(3)?.as_str().parse::<i32>().ok()?;
    if hours > 14 || minutes > 59 {
        return None;
    }
    Some(sign * (hours * 3600 + minutes * 60))
}
