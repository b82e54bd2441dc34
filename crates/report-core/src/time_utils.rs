use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::error::{ReportError, Result};
use crate::models::SessionRecord;

/// Accepted timestamp patterns, tried in order.
///
/// The first matches exports like `2024-03-01 13:45:00`, the second the
/// short form `3/1/24 13:45` produced by older controller firmware.
pub const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%m/%d/%y %H:%M"];

/// Parse a timestamp string in either accepted format.
///
/// Returns the first successful parse, or [`ReportError::TimestampParse`]
/// when neither pattern matches.
pub fn normalize_timestamp(value: &str) -> Result<NaiveDateTime> {
    for fmt in TIMESTAMP_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Ok(dt);
        }
    }
    Err(ReportError::TimestampParse(value.to_string()))
}

/// Scan the raw records for the earliest and latest parseable `end_time`.
///
/// Row-level tolerant: records with an empty or unparseable end time are
/// skipped. Returns `None` when no record yields a valid timestamp. Used
/// to report date bounds before a report is generated; the report build
/// itself parses strictly.
pub fn end_time_bounds(records: &[SessionRecord]) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let mut bounds: Option<(NaiveDateTime, NaiveDateTime)> = None;
    let mut skipped = 0usize;

    for record in records {
        if record.end_time.is_empty() {
            continue;
        }
        let Ok(ts) = normalize_timestamp(&record.end_time) else {
            skipped += 1;
            continue;
        };
        bounds = Some(match bounds {
            None => (ts, ts),
            Some((min, max)) => (min.min(ts), max.max(ts)),
        });
    }

    if skipped > 0 {
        debug!("Date-bounds scan skipped {} unparseable end times", skipped);
    }
    bounds
}

/// Header label for one day column, e.g. `01-Mar`.
pub fn day_label(day: NaiveDate) -> String {
    day.format("%d-%b").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    // ── normalize_timestamp ───────────────────────────────────────────────────

    #[test]
    fn test_normalize_long_format() {
        let ts = normalize_timestamp("2024-03-01 13:45:00").unwrap();
        assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(ts.hour(), 13);
        assert_eq!(ts.minute(), 45);
    }

    #[test]
    fn test_normalize_short_format() {
        let ts = normalize_timestamp("3/1/24 13:45").unwrap();
        assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(ts.hour(), 13);
    }

    #[test]
    fn test_normalize_both_formats_same_date() {
        let long = normalize_timestamp("2024-03-01 13:45:00").unwrap();
        let short = normalize_timestamp("3/1/24 13:45").unwrap();
        assert_eq!(long.date(), short.date());
    }

    #[test]
    fn test_normalize_invalid_fails() {
        let err = normalize_timestamp("not-a-date").unwrap_err();
        assert_eq!(err.to_string(), "Invalid date format: not-a-date");
    }

    #[test]
    fn test_normalize_rejects_trailing_garbage() {
        assert!(normalize_timestamp("2024-03-01 13:45:00 extra").is_err());
    }

    // ── end_time_bounds ───────────────────────────────────────────────────────

    fn record_with_end(end: &str) -> SessionRecord {
        SessionRecord {
            location: "Site A".to_string(),
            end_time: end.to_string(),
            ..SessionRecord::default()
        }
    }

    #[test]
    fn test_bounds_min_and_max() {
        let records = vec![
            record_with_end("2024-01-15 09:00:00"),
            record_with_end("2024-01-10 23:59:59"),
            record_with_end("2024-01-20 00:00:01"),
        ];
        let (min, max) = end_time_bounds(&records).unwrap();
        assert_eq!(min.date().day(), 10);
        assert_eq!(max.date().day(), 20);
    }

    #[test]
    fn test_bounds_skips_unparseable() {
        let records = vec![
            record_with_end("garbage"),
            record_with_end(""),
            record_with_end("2024-01-10 08:00:00"),
        ];
        let (min, max) = end_time_bounds(&records).unwrap();
        assert_eq!(min, max);
    }

    #[test]
    fn test_bounds_none_when_no_valid_dates() {
        let records = vec![record_with_end("garbage"), record_with_end("")];
        assert!(end_time_bounds(&records).is_none());
    }

    // ── day_label ─────────────────────────────────────────────────────────────

    #[test]
    fn test_day_label_format() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(day_label(day), "01-Mar");
    }
}
