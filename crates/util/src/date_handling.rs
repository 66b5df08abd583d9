//! # Date Handling Utilities
//!
//! Parsing of index values into UTC timestamps, and compact labels for chart
//! axes.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Magnitude at which numeric epochs are read as milliseconds instead of
/// seconds. `1e11` seconds is more than 3000 years out.
const EPOCH_MILLIS_THRESHOLD: f64 = 1e11;

const NAIVE_DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Parses a timestamp string into UTC.
///
/// Accepted forms, tried in order:
/// - RFC 3339 with offset (`2024-01-01T00:00:00Z`, `2024-01-01T02:00:00+02:00`)
/// - naive date-times, read as UTC (`2024-01-01T00:00:00`, `2024-01-01 00:00`)
/// - plain dates at midnight UTC (`2024-01-01`, `2024/01/01`)
///
/// # Example
/// ```rust
/// use hashdash_util::date_handling::parse_timestamp;
///
/// let parsed = parse_timestamp("2024-01-02T00:00:00Z").unwrap();
/// assert_eq!(parsed.to_rfc3339(), "2024-01-02T00:00:00+00:00");
/// assert!(parse_timestamp("not-a-date").is_none());
/// ```
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date_time) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(date_time.with_timezone(&Utc));
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(naive.and_utc());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }

    None
}

/// Interprets a number as a Unix epoch: seconds, or milliseconds when the
/// magnitude is at least `1e11`. Non-finite and out-of-range values yield
/// `None`.
pub fn timestamp_from_epoch(value: f64) -> Option<DateTime<Utc>> {
    if !value.is_finite() {
        return None;
    }
    if value.abs() >= EPOCH_MILLIS_THRESHOLD {
        return DateTime::from_timestamp_millis(value.round() as i64);
    }
    let seconds = value.floor();
    let nanos = ((value - seconds) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(seconds as i64, nanos)
}

/// Formats an epoch-seconds axis position for a chart label. Spans longer
/// than two days show dates only.
pub fn format_axis_label(epoch_seconds: f64, span_seconds: f64) -> String {
    let Some(timestamp) = timestamp_from_epoch(epoch_seconds) else {
        return String::new();
    };
    if span_seconds > 2.0 * 86_400.0 {
        timestamp.format("%Y-%m-%d").to_string()
    } else {
        timestamp.format("%m-%d %H:%M").to_string()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn rfc3339_offsets_are_normalized_to_utc() {
        let parsed = parse_timestamp("2024-01-01T02:00:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn naive_forms_are_read_as_utc() {
        let expected = Utc.with_ymd_and_hms(2023, 6, 15, 14, 22, 30).unwrap();
        assert_eq!(parse_timestamp("2023-06-15T14:22:30"), Some(expected));
        assert_eq!(parse_timestamp("2023-06-15 14:22:30"), Some(expected));
        assert_eq!(parse_timestamp("2023-06-15T14:22:30.000"), Some(expected));
        assert_eq!(parse_timestamp("2023/06/15"), Some(Utc.with_ymd_and_hms(2023, 6, 15, 0, 0, 0).unwrap()));
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(parse_timestamp("not-a-date"), None);
        assert_eq!(parse_timestamp("2023-13-45"), None);
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("1704067200"), None);
    }

    #[test]
    fn epochs_switch_to_millis_for_large_values() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(timestamp_from_epoch(1_704_067_200.0), Some(expected));
        assert_eq!(timestamp_from_epoch(1_704_067_200_000.0), Some(expected));
        assert_eq!(timestamp_from_epoch(f64::NAN), None);
    }

    #[test]
    fn axis_labels_depend_on_span() {
        assert_eq!(format_axis_label(1_704_067_200.0, 30.0 * 86_400.0), "2024-01-01");
        assert_eq!(format_axis_label(1_704_067_200.0, 3_600.0), "01-01 00:00");
    }
}
