//! # slot-engine
//!
//! Free-slot resolution for coordinating tennis matches.
//!
//! Given the windows a player has declared free and the busy blocks imported
//! from their calendars, the engine computes the open sub-windows long enough
//! to host a match. Everything here is pure and synchronous: callers pass in
//! snapshots (including "now") and get derived values back.
//!
//! ## Modules
//!
//! - [`interval`] — the `Interval` value type and its predicates
//! - [`merge`] — collapse overlapping/adjacent intervals into a disjoint set
//! - [`freeslots`] — subtract busy intervals from availability windows
//! - [`chunker`] — hour-aligned start-time suggestions within free slots
//! - [`overlap`] — pairwise overlap detection and the new-window guard
//! - [`busy`] — busy blocks with provenance, calendar import and replacement
//! - [`recurrence`] — expand recurring availability via RRULE
//! - [`format`] — timestamp parsing, slot and duration rendering
//! - [`error`] — Error types
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::{Duration, TimeZone, Utc};
//! use slot_engine::{compute_free_slots, Interval};
//!
//! let at = |h, m| Utc.with_ymd_and_hms(2026, 3, 1, h, m, 0).unwrap();
//! let availability = [Interval::new(at(9, 0), at(12, 0)).unwrap()];
//! let busy = [Interval::new(at(10, 0), at(10, 30)).unwrap()];
//!
//! let slots = compute_free_slots(&availability, &busy, Duration::minutes(60)).unwrap();
//! assert_eq!(slots.len(), 2);
//! assert_eq!(slots[1].start, at(10, 30));
//! ```

pub mod busy;
pub mod chunker;
pub mod error;
pub mod format;
pub mod freeslots;
pub mod interval;
pub mod merge;
pub mod overlap;
pub mod recurrence;

pub use busy::{busy_intervals, prepare_import, replace_source, BusyBlock, BusySource};
pub use chunker::hourly_blocks;
pub use error::SlotError;
pub use format::{format_duration, format_slot, parse_timestamp};
pub use freeslots::{compute_free_slots, first_free_slot};
pub use interval::{duration_from_minutes, Interval};
pub use merge::merge_intervals;
pub use overlap::{ensure_no_overlap, find_overlaps, Overlap};
pub use recurrence::{expand_recurring_window, RecurringWindow};
