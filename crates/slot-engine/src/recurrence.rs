//! Recurring availability -- expands "every Tuesday 18:00 for two hours"
//! declarations into concrete availability intervals.
//!
//! Wraps the `rrule` crate (v0.13) and `chrono-tz`. The DTSTART is local wall
//! time in the window's timezone, so instances keep their local start time
//! across DST changes.

use chrono::{DateTime, Duration, Utc};
use rrule::RRuleSet;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::interval::{ensure_positive, Interval};

/// Upper bound on instances generated per rule within one horizon.
const MAX_INSTANCES: u16 = 500;

/// A recurring availability declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringWindow {
    /// RFC 5545 RRULE body, e.g. `FREQ=WEEKLY;BYDAY=TU,TH`.
    pub rrule: String,
    /// Local start of the first occurrence, e.g. `2026-03-03T18:00:00`.
    pub dtstart: String,
    pub duration_minutes: u32,
    /// IANA timezone the DTSTART is expressed in.
    pub timezone: String,
    /// Local start times of skipped occurrences (same format as `dtstart`).
    #[serde(default)]
    pub exdates: Vec<String>,
}

/// Expand a recurring window into concrete intervals inside `horizon`.
///
/// Occurrences that straddle a horizon edge are clipped to it; occurrences
/// wholly outside are dropped. The result is sorted by start.
///
/// # Errors
/// Returns `SlotError::InvalidRule` if the RRULE is empty or unparseable,
/// `SlotError::InvalidTimezone` for an unknown IANA name,
/// `SlotError::InvalidDuration` for a zero duration and
/// `SlotError::InvalidInterval` for a malformed horizon.
pub fn expand_recurring_window(window: &RecurringWindow, horizon: Interval) -> Result<Vec<Interval>> {
    horizon.validate()?;

    if window.rrule.trim().is_empty() {
        return Err(SlotError::InvalidRule("empty RRULE string".to_string()));
    }

    let duration = Duration::minutes(i64::from(window.duration_minutes));
    ensure_positive(duration, "recurring window duration")?;

    let _tz: chrono_tz::Tz = window
        .timezone
        .parse()
        .map_err(|_| SlotError::InvalidTimezone(window.timezone.clone()))?;

    let rrule_set: RRuleSet = rule_text(window)
        .parse()
        .map_err(|e| SlotError::InvalidRule(format!("{}", e)))?;

    // Bound generation to the horizon so an old DTSTART still reaches it. The
    // lower bound reaches back one duration for occurrences straddling the start.
    let lower = horizon.start.checked_sub_signed(duration).unwrap_or(horizon.start);
    let exdate_room = u16::try_from(window.exdates.len()).unwrap_or(u16::MAX);
    let limit = MAX_INSTANCES.saturating_add(exdate_room);
    let instances = rrule_set
        .after(lower.with_timezone(&rrule::Tz::UTC))
        .before(horizon.end.with_timezone(&rrule::Tz::UTC))
        .all(limit);

    let mut intervals: Vec<Interval> = instances
        .dates
        .into_iter()
        .filter_map(|dt| {
            let start: DateTime<Utc> = dt.with_timezone(&Utc);
            let occurrence = Interval {
                start,
                end: start
                    .checked_add_signed(duration)
                    .unwrap_or(DateTime::<Utc>::MAX_UTC),
            };
            occurrence.clip_to(&horizon)
        })
        .collect();
    intervals.sort_unstable();

    tracing::debug!(
        rrule = %window.rrule,
        timezone = %window.timezone,
        occurrences = intervals.len(),
        "expanded recurring availability"
    );

    Ok(intervals)
}

/// Build the iCalendar text block the `rrule` crate parses.
fn rule_text(window: &RecurringWindow) -> String {
    let mut text = format!(
        "DTSTART;TZID={}:{}\nRRULE:{}",
        window.timezone,
        to_ical(&window.dtstart),
        window.rrule.trim()
    );

    if !window.exdates.is_empty() {
        let exdates: Vec<String> = window.exdates.iter().map(|d| to_ical(d)).collect();
        text.push_str(&format!(
            "\nEXDATE;TZID={}:{}",
            window.timezone,
            exdates.join(",")
        ));
    }

    text
}

/// "2026-03-03T18:00:00" -> "20260303T180000".
fn to_ical(local: &str) -> String {
    local.replace(['-', ':'], "")
}
