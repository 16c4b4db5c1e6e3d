//! The `Interval` value type shared by every engine operation.
//!
//! An interval is a half-open span `[start, end)` of UTC instants. Two intervals
//! that merely touch (`a.end == b.start`) do not overlap, but they do count as
//! mergeable when busy blocks are collapsed.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// A span of time between two UTC instants.
///
/// Fields are public because intervals usually arrive as plain records from the
/// host's storage layer. Use [`Interval::new`] to build one with validation, or
/// [`Interval::validate`] to check one that came in from outside; every engine
/// entry point validates its inputs before computing anything.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    /// Build an interval, rejecting zero-length and inverted spans.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        let interval = Self { start, end };
        interval.validate()?;
        Ok(interval)
    }

    /// Check the `start < end` invariant.
    pub fn validate(&self) -> Result<()> {
        if self.start < self.end {
            Ok(())
        } else {
            Err(SlotError::InvalidInterval {
                start: self.start,
                end: self.end,
            })
        }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Length in whole minutes, truncated.
    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// Strict overlap: shared boundaries do not count.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Overlap or adjacency (`self.end == other.start` or vice versa).
    pub fn touches(&self, other: &Interval) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Whether `other` lies entirely inside `self`.
    pub fn contains(&self, other: &Interval) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// The part of `self` that falls inside `window`, if any.
    pub fn clip_to(&self, window: &Interval) -> Option<Interval> {
        let start = self.start.max(window.start);
        let end = self.end.min(window.end);
        (start < end).then_some(Interval { start, end })
    }
}

/// Validate every interval in a slice, failing on the first bad one.
pub(crate) fn validate_all(intervals: &[Interval]) -> Result<()> {
    intervals.iter().try_for_each(Interval::validate)
}

/// Reject zero and negative durations.
pub(crate) fn ensure_positive(duration: Duration, what: &str) -> Result<()> {
    if duration > Duration::zero() {
        Ok(())
    } else {
        Err(SlotError::InvalidDuration(format!(
            "{} must be positive, got {} seconds",
            what,
            duration.num_seconds()
        )))
    }
}

/// Build a duration from whole minutes, as supplied at the JSON/JS boundary.
///
/// # Errors
/// Returns `SlotError::InvalidDuration` when `minutes` is outside the range a
/// `chrono::Duration` can hold. Sign is not checked here; the operation taking
/// the duration decides whether it must be positive.
pub fn duration_from_minutes(minutes: i64) -> Result<Duration> {
    Duration::try_minutes(minutes).ok_or_else(|| {
        SlotError::InvalidDuration(format!("{} minutes is out of range", minutes))
    })
}
