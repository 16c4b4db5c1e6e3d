//! Cut free slots into hour-aligned, fixed-length start-time suggestions.
//!
//! This sits on top of [`crate::freeslots`] output and is what the host shows
//! in a "pick a start time" list.

use chrono::{DateTime, Duration, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use crate::error::Result;
use crate::interval::{ensure_positive, validate_all, Interval};

/// How many local hours past the current one to try before giving up. Covers
/// DST gaps and the rare zone that skipped a whole day.
const MAX_HOURS_AHEAD: usize = 48;

/// Produce up to `max_blocks` blocks of length `block`, each starting on a
/// clock-hour boundary in `tz` and lying inside one of `free_slots`.
///
/// Within a slot the first block starts at the slot start (or `now`, if that is
/// later) rounded up to the next hour; further blocks follow back to back. A
/// block never extends past its slot's end and never starts before `now`.
/// Processing stops as soon as `max_blocks` blocks have been emitted.
///
/// # Errors
/// Returns `SlotError::InvalidDuration` if `block` is not positive and
/// `SlotError::InvalidInterval` for a malformed slot.
pub fn hourly_blocks(
    free_slots: &[Interval],
    block: Duration,
    max_blocks: usize,
    now: DateTime<Utc>,
    tz: Tz,
) -> Result<Vec<Interval>> {
    ensure_positive(block, "block duration")?;
    validate_all(free_slots)?;

    let mut blocks = Vec::new();
    if max_blocks == 0 {
        return Ok(blocks);
    }

    'slots: for slot in free_slots {
        let Some(mut cursor) = ceil_to_hour(slot.start.max(now), tz) else {
            continue;
        };
        // An end past the representable range never fits.
        while let Some(end) = cursor
            .checked_add_signed(block)
            .filter(|end| *end <= slot.end)
        {
            blocks.push(Interval { start: cursor, end });
            if blocks.len() == max_blocks {
                break 'slots;
            }
            cursor = end;
        }
    }

    tracing::debug!(
        slots = free_slots.len(),
        blocks = blocks.len(),
        max_blocks,
        "chunked free slots into hourly blocks"
    );

    Ok(blocks)
}

/// Round `instant` up to the next whole hour on the local clock of `tz`.
///
/// Instants already on an hour boundary are returned unchanged. The next hour
/// is resolved through the zone's local time, so skipped local hours (DST gaps,
/// including half-hour shifts) move on to the next hour that exists. Returns
/// `None` only at the end of the representable time range.
pub fn ceil_to_hour(instant: DateTime<Utc>, tz: Tz) -> Option<DateTime<Utc>> {
    let local = instant.with_timezone(&tz);
    if local.minute() == 0 && local.second() == 0 && local.nanosecond() == 0 {
        return Some(instant);
    }

    let mut hour = local
        .naive_local()
        .with_minute(0)?
        .with_second(0)?
        .with_nanosecond(0)?;

    // Start from the current local hour: when it repeats (fall back), its
    // second occurrence may still lie ahead of `instant`.
    for _ in 0..MAX_HOURS_AHEAD {
        let resolved = tz.from_local_datetime(&hour);
        let next = [resolved.earliest(), resolved.latest()]
            .into_iter()
            .flatten()
            .map(|dt| dt.with_timezone(&Utc))
            .find(|dt| *dt > instant);
        if next.is_some() {
            return next;
        }
        hour = hour.checked_add_signed(Duration::hours(1))?;
    }

    None
}
