//! Timestamp normalization and day bucketing (UTC, day granularity)

use crate::error::{MindmateError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 timestamp and normalize it to UTC
///
/// Timestamps without an offset are read as UTC; a bare date is midnight UTC.
/// Returns `None` for anything unparseable.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Some(t.with_timezone(&Utc));
    }

    // Offsets without a colon (e.g. +0200) are valid ISO-8601 but not RFC 3339
    for format in ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"] {
        if let Ok(t) = DateTime::parse_from_str(raw, format) {
            return Some(t.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(t) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(t.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
}

/// Like [`parse_timestamp`], but an unusable input is an error (for user-supplied values)
pub fn require_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    parse_timestamp(raw).ok_or_else(|| MindmateError::InvalidTimestamp(raw.to_string()))
}

/// Truncate an instant to the start of its UTC day
pub fn start_of_day(t: DateTime<Utc>) -> DateTime<Utc> {
    t.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Whole-day offset of `t` from the day containing `window_start`
///
/// Negative when `t` falls on an earlier day.
pub fn day_offset(window_start: DateTime<Utc>, t: DateTime<Utc>) -> i64 {
    (t.date_naive() - window_start.date_naive()).num_days()
}

/// Bucket index of `t` in a window of `days` days, or `None` outside `[0, days)`
pub fn bucket_index(window_start: DateTime<Utc>, t: DateTime<Utc>, days: usize) -> Option<usize> {
    let offset = day_offset(window_start, t);
    if offset < 0 {
        return None;
    }
    let offset = offset as usize;
    (offset < days).then_some(offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let t = parse_timestamp("2025-01-17T01:30:00+02:00").unwrap();
        assert_eq!(t, utc(2025, 1, 16, 23, 30, 0));
    }

    #[test]
    fn test_parse_zulu_and_fraction() {
        let t = parse_timestamp("2025-01-17T08:00:00.123456Z").unwrap();
        assert_eq!(start_of_day(t), utc(2025, 1, 17, 0, 0, 0));
    }

    #[test]
    fn test_parse_compact_offset() {
        let t = parse_timestamp("2025-01-17T08:00:00+0100").unwrap();
        assert_eq!(t, utc(2025, 1, 17, 7, 0, 0));
    }

    #[test]
    fn test_parse_naive_is_utc() {
        assert_eq!(
            parse_timestamp("2025-01-17T08:00:00").unwrap(),
            utc(2025, 1, 17, 8, 0, 0)
        );
        assert_eq!(
            parse_timestamp("2025-01-17 08:00:00.5").unwrap(),
            utc(2025, 1, 17, 8, 0, 0) + chrono::Duration::milliseconds(500)
        );
        assert_eq!(
            parse_timestamp("2025-01-17").unwrap(),
            utc(2025, 1, 17, 0, 0, 0)
        );
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("   ").is_none());
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("2025-13-01T00:00:00Z").is_none());
        assert!(require_timestamp("nope").is_err());
    }

    #[test]
    fn test_day_offset_ignores_time_of_day() {
        let start = utc(2025, 1, 15, 0, 0, 0);
        assert_eq!(day_offset(start, utc(2025, 1, 15, 23, 59, 59)), 0);
        assert_eq!(day_offset(start, utc(2025, 1, 16, 0, 0, 0)), 1);
        assert_eq!(day_offset(start, utc(2025, 1, 14, 23, 59, 59)), -1);
    }

    #[test]
    fn test_bucket_index_bounds() {
        let start = utc(2025, 1, 15, 0, 0, 0);
        assert_eq!(bucket_index(start, utc(2025, 1, 15, 12, 0, 0), 3), Some(0));
        assert_eq!(bucket_index(start, utc(2025, 1, 17, 12, 0, 0), 3), Some(2));
        assert_eq!(bucket_index(start, utc(2025, 1, 18, 0, 0, 0), 3), None);
        assert_eq!(bucket_index(start, utc(2025, 1, 14, 12, 0, 0), 3), None);
        assert_eq!(bucket_index(start, utc(2025, 1, 15, 12, 0, 0), 0), None);
    }

    #[test]
    fn test_month_boundary() {
        let start = utc(2025, 1, 30, 0, 0, 0);
        assert_eq!(day_offset(start, utc(2025, 2, 1, 3, 0, 0)), 2);
    }
}
