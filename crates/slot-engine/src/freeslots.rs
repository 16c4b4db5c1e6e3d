//! Compute bookable free slots from availability windows and busy intervals.
//!
//! Each availability window is resolved on its own: the busy intervals that
//! overlap it are sorted and walked with a cursor, and every gap of at least
//! the requested duration is emitted. Busy input does not need to be merged or
//! sorted beforehand.

use chrono::{DateTime, Duration, Utc};

use crate::error::Result;
use crate::interval::{ensure_positive, validate_all, Interval};

/// Find every maximal free sub-interval of `availability` that avoids all of
/// `busy` and lasts at least `min_duration`.
///
/// Output is grouped by availability window in input order, ascending by start
/// within each window. A window with no overlapping busy interval is returned
/// whole. Overlapping availability windows are not merged first, so the same
/// wall-clock time can appear in two slots.
///
/// # Errors
/// Returns `SlotError::InvalidInterval` for any inverted or empty input interval
/// and `SlotError::InvalidDuration` when `min_duration` is not positive. Nothing
/// is computed until all input has been validated.
pub fn compute_free_slots(
    availability: &[Interval],
    busy: &[Interval],
    min_duration: Duration,
) -> Result<Vec<Interval>> {
    ensure_positive(min_duration, "minimum slot duration")?;
    validate_all(availability)?;
    validate_all(busy)?;

    let mut slots = Vec::new();
    for window in availability {
        resolve_window(window, busy, min_duration, &mut slots);
    }

    tracing::debug!(
        windows = availability.len(),
        busy = busy.len(),
        slots = slots.len(),
        min_minutes = min_duration.num_minutes(),
        "resolved free slots"
    );

    Ok(slots)
}

/// Return the free slot with the earliest start, if any qualifies.
///
/// Delegates to [`compute_free_slots`]; ties keep the first one emitted.
pub fn first_free_slot(
    availability: &[Interval],
    busy: &[Interval],
    min_duration: Duration,
) -> Result<Option<Interval>> {
    let slots = compute_free_slots(availability, busy, min_duration)?;
    Ok(slots.into_iter().min_by_key(|slot| slot.start))
}

fn resolve_window(
    window: &Interval,
    busy: &[Interval],
    min_duration: Duration,
    out: &mut Vec<Interval>,
) {
    let mut conflicts: Vec<&Interval> = busy.iter().filter(|b| b.overlaps(window)).collect();

    if conflicts.is_empty() {
        if window.duration() >= min_duration {
            out.push(*window);
        }
        return;
    }

    conflicts.sort_unstable_by_key(|b| (b.start, b.end));

    let mut cursor = window.start;
    for conflict in conflicts {
        if conflict.start > cursor {
            push_gap(cursor, conflict.start.min(window.end), min_duration, out);
        }
        // Never move backward: a later block may be nested in an earlier one.
        cursor = cursor.max(conflict.end);
        if cursor >= window.end {
            tracing::trace!(window_start = %window.start, "window fully consumed");
            return;
        }
    }

    push_gap(cursor, window.end, min_duration, out);
}

fn push_gap(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    min_duration: Duration,
    out: &mut Vec<Interval>,
) {
    if end - start >= min_duration {
        out.push(Interval { start, end });
    }
}
