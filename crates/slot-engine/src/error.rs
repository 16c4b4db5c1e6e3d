//! Error types for slot-engine operations.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::interval::Interval;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SlotError {
    /// An interval whose start is not strictly before its end.
    #[error("Invalid interval: start {start} is not before end {end}")]
    InvalidInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    /// A new availability window collides with one the user already has.
    #[error("Window overlaps existing availability {}..{}", .existing.start, .existing.end)]
    OverlapsExisting { existing: Interval },

    #[error("Invalid RRULE: {0}")]
    InvalidRule(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

pub type Result<T> = std::result::Result<T, SlotError>;
