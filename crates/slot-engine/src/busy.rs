//! Busy blocks with provenance, and the import path from raw calendar events.
//!
//! A calendar sync produces a batch of raw events from one source. Before they
//! are stored they are clipped to the sync window and merged, and the blocks
//! previously imported from the same source are replaced wholesale. Blocks from
//! other sources are left alone.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::interval::{validate_all, Interval};
use crate::merge::merge_intervals;

/// Where a busy block came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum BusySource {
    /// Events read from the calendar on the user's device.
    DeviceCalendar,
    /// Events pulled from a connected calendar provider (e.g. "google").
    Provider(String),
    /// A confirmed match booking.
    Booking,
}

impl fmt::Display for BusySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusySource::DeviceCalendar => write!(f, "device"),
            BusySource::Provider(name) => write!(f, "provider:{}", name),
            BusySource::Booking => write!(f, "booking"),
        }
    }
}

/// A stored busy period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyBlock {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub source: BusySource,
}

impl BusyBlock {
    pub fn interval(&self) -> Interval {
        Interval {
            start: self.start,
            end: self.end,
        }
    }
}

/// Turn raw calendar events from one source into storable busy blocks.
///
/// Events are clipped to `window` when one is given (events wholly outside it
/// are dropped), then merged so that overlapping and back-to-back events become
/// a single block.
///
/// # Errors
/// Returns `SlotError::InvalidInterval` if any event or the window is malformed.
pub fn prepare_import(
    source: BusySource,
    raw: &[Interval],
    window: Option<Interval>,
) -> Result<Vec<BusyBlock>> {
    validate_all(raw)?;

    let clipped: Vec<Interval> = match window {
        Some(window) => {
            window.validate()?;
            raw.iter().filter_map(|event| event.clip_to(&window)).collect()
        }
        None => raw.to_vec(),
    };

    let blocks: Vec<BusyBlock> = merge_intervals(&clipped)?
        .into_iter()
        .map(|interval| BusyBlock {
            start: interval.start,
            end: interval.end,
            source: source.clone(),
        })
        .collect();

    tracing::debug!(
        %source,
        raw = raw.len(),
        kept = clipped.len(),
        blocks = blocks.len(),
        "prepared calendar import"
    );

    Ok(blocks)
}

/// Replace every block of `source` in `existing` with `fresh`.
///
/// Returns the combined set sorted by start, then end.
pub fn replace_source(
    existing: &[BusyBlock],
    source: &BusySource,
    fresh: Vec<BusyBlock>,
) -> Vec<BusyBlock> {
    let mut combined: Vec<BusyBlock> = existing
        .iter()
        .filter(|block| &block.source != source)
        .cloned()
        .collect();
    combined.extend(fresh);
    combined.sort_by_key(|block| (block.start, block.end));
    combined
}

/// Strip provenance so the blocks can be fed to the free-slot resolver.
pub fn busy_intervals(blocks: &[BusyBlock]) -> Vec<Interval> {
    blocks.iter().map(BusyBlock::interval).collect()
}
