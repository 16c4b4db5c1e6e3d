//! Timestamp parsing and human-readable rendering of slots and durations.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use chrono_tz::Tz;

use crate::error::{Result, SlotError};
use crate::interval::Interval;

/// Parse an ISO 8601 timestamp into `DateTime<Utc>`.
///
/// Accepts RFC 3339 with an offset (`2026-03-01T09:00:00+01:00`, `...Z`) and
/// naive `YYYY-MM-DDTHH:MM:SS`, which is read as UTC.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc())
        .map_err(|e| SlotError::InvalidTimestamp(format!("'{}': {}", s, e)))
}

/// Render a duration as `"1h 30m"`, `"2h"` or `"45m"`.
///
/// Seconds are truncated; negative durations render with a leading `-`.
pub fn format_duration(duration: Duration) -> String {
    let total = duration.num_minutes();
    let sign = if total < 0 { "-" } else { "" };
    let (hours, minutes) = (total.abs() / 60, total.abs() % 60);

    match (hours, minutes) {
        (0, m) => format!("{}{}m", sign, m),
        (h, 0) => format!("{}{}h", sign, h),
        (h, m) => format!("{}{}h {}m", sign, h, m),
    }
}

/// Render a slot on the local clock of `tz`.
///
/// Same-day slots print as `"Tue Mar 3, 09:00-10:30"`; slots that cross local
/// midnight print both dates.
pub fn format_slot(slot: &Interval, tz: Tz) -> String {
    let start = slot.start.with_timezone(&tz);
    let end = slot.end.with_timezone(&tz);

    if start.date_naive() == end.date_naive() {
        format!(
            "{}, {}-{}",
            start.format("%a %b %-d"),
            start.format("%H:%M"),
            end.format("%H:%M")
        )
    } else {
        format!(
            "{} - {}",
            start.format("%a %b %-d, %H:%M"),
            end.format("%a %b %-d, %H:%M")
        )
    }
}
