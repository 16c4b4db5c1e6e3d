//! Collapse overlapping or back-to-back intervals into a minimal disjoint set.
//!
//! Used to reduce raw calendar events to busy blocks before they are stored.

use crate::error::Result;
use crate::interval::{validate_all, Interval};

/// Merge overlapping or adjacent intervals.
///
/// Returns a new list sorted by start, pairwise disjoint, covering exactly the
/// union of the input. Touching intervals (`a.end == b.start`) are fused since
/// back-to-back events leave no usable gap. Input order does not matter and the
/// input is left untouched.
///
/// # Errors
/// Returns `SlotError::InvalidInterval` if any input has `start >= end`.
pub fn merge_intervals(intervals: &[Interval]) -> Result<Vec<Interval>> {
    validate_all(intervals)?;

    if intervals.is_empty() {
        return Ok(Vec::new());
    }

    let mut sorted = intervals.to_vec();
    sorted.sort_unstable();

    let mut merged: Vec<Interval> = Vec::with_capacity(sorted.len());
    for interval in sorted {
        if let Some(last) = merged.last_mut() {
            if interval.start <= last.end {
                last.end = last.end.max(interval.end);
                continue;
            }
        }
        merged.push(interval);
    }

    tracing::debug!(
        input = intervals.len(),
        output = merged.len(),
        "merged intervals"
    );

    Ok(merged)
}
