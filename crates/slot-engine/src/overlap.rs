//! Detect overlapping intervals.
//!
//! Adjacent intervals (one ends exactly when the other starts) never overlap.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::interval::Interval;

/// A pair of intervals that share some time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overlap {
    pub a: Interval,
    pub b: Interval,
    pub overlap_minutes: i64,
}

/// Find all pairwise overlaps between two interval lists.
///
/// The overlap duration is `min(a.end, b.end) - max(a.start, b.start)`. Results
/// are ordered by position in `a`, then by position in `b`.
pub fn find_overlaps(a: &[Interval], b: &[Interval]) -> Vec<Overlap> {
    let mut overlaps = Vec::new();

    for left in a {
        for right in b {
            if left.overlaps(right) {
                let overlap_start = left.start.max(right.start);
                let overlap_end = left.end.min(right.end);
                overlaps.push(Overlap {
                    a: *left,
                    b: *right,
                    overlap_minutes: (overlap_end - overlap_start).num_minutes(),
                });
            }
        }
    }

    overlaps
}

/// Check that a new availability window does not collide with existing ones.
///
/// # Errors
/// Returns `SlotError::InvalidInterval` if `candidate` is malformed and
/// `SlotError::OverlapsExisting` carrying the first existing window it overlaps.
pub fn ensure_no_overlap(existing: &[Interval], candidate: &Interval) -> Result<()> {
    candidate.validate()?;

    match existing.iter().find(|window| window.overlaps(candidate)) {
        Some(window) => Err(SlotError::OverlapsExisting { existing: *window }),
        None => Ok(()),
    }
}
