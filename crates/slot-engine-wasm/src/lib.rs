//! WASM bindings for slot-engine.
//!
//! Exposes busy-block merging, free-slot resolution, start-time blocks, overlap
//! detection and recurring availability to the JavaScript app via
//! `wasm-bindgen`. Complex values cross the boundary as JSON strings;
//! timestamps are ISO 8601 and every duration is in minutes.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target bundler --out-dir packages/slot-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use chrono::SecondsFormat;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use slot_engine::{Interval, Overlap, RecurringWindow};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SlotDto {
    start: String,
    end: String,
    duration_minutes: i64,
}

impl From<&Interval> for SlotDto {
    fn from(i: &Interval) -> Self {
        Self {
            start: i.start.to_rfc3339_opts(SecondsFormat::Secs, true),
            end: i.end.to_rfc3339_opts(SecondsFormat::Secs, true),
            duration_minutes: i.duration_minutes(),
        }
    }
}

#[derive(Serialize)]
struct OverlapDto {
    a: SlotDto,
    b: SlotDto,
    overlap_minutes: i64,
}

impl From<&Overlap> for OverlapDto {
    fn from(o: &Overlap) -> Self {
        Self {
            a: SlotDto::from(&o.a),
            b: SlotDto::from(&o.b),
            overlap_minutes: o.overlap_minutes,
        }
    }
}

/// Interval as sent from JavaScript. Extra fields (row ids, owners) are ignored.
#[derive(Deserialize)]
struct IntervalInput {
    start: String,
    end: String,
}

// ---------------------------------------------------------------------------
// JSON-in / JSON-out implementations, kept free of `JsValue` so they run natively
// ---------------------------------------------------------------------------

fn parse_intervals_json(json: &str) -> Result<Vec<Interval>, String> {
    let inputs: Vec<IntervalInput> =
        serde_json::from_str(json).map_err(|e| format!("Invalid intervals JSON: {}", e))?;

    inputs
        .into_iter()
        .map(|input| {
            Ok(Interval {
                start: slot_engine::parse_timestamp(&input.start).map_err(|e| e.to_string())?,
                end: slot_engine::parse_timestamp(&input.end).map_err(|e| e.to_string())?,
            })
        })
        .collect()
}

fn slots_json(intervals: &[Interval]) -> Result<String, String> {
    let dtos: Vec<SlotDto> = intervals.iter().map(SlotDto::from).collect();
    serde_json::to_string(&dtos).map_err(|e| format!("Serialization error: {}", e))
}

fn merge_json(intervals_json: &str) -> Result<String, String> {
    let intervals = parse_intervals_json(intervals_json)?;
    let merged = slot_engine::merge_intervals(&intervals).map_err(|e| e.to_string())?;
    slots_json(&merged)
}

fn free_slots_json(
    availability_json: &str,
    busy_json: &str,
    min_duration_minutes: i64,
) -> Result<String, String> {
    let availability = parse_intervals_json(availability_json)?;
    let busy = parse_intervals_json(busy_json)?;
    let min_duration =
        slot_engine::duration_from_minutes(min_duration_minutes).map_err(|e| e.to_string())?;
    let slots = slot_engine::compute_free_slots(&availability, &busy, min_duration)
        .map_err(|e| e.to_string())?;
    slots_json(&slots)
}

fn hourly_blocks_json(
    free_slots_json: &str,
    block_minutes: i64,
    max_blocks: usize,
    now: &str,
    timezone: &str,
) -> Result<String, String> {
    let free = parse_intervals_json(free_slots_json)?;
    let now = slot_engine::parse_timestamp(now).map_err(|e| e.to_string())?;
    let tz: Tz = timezone
        .parse()
        .map_err(|_| format!("Invalid timezone: {}", timezone))?;

    let block = slot_engine::duration_from_minutes(block_minutes).map_err(|e| e.to_string())?;
    let blocks = slot_engine::hourly_blocks(&free, block, max_blocks, now, tz)
        .map_err(|e| e.to_string())?;
    slots_json(&blocks)
}

fn overlaps_json(a_json: &str, b_json: &str) -> Result<String, String> {
    let a = parse_intervals_json(a_json)?;
    let b = parse_intervals_json(b_json)?;

    let dtos: Vec<OverlapDto> = slot_engine::find_overlaps(&a, &b)
        .iter()
        .map(OverlapDto::from)
        .collect();
    serde_json::to_string(&dtos).map_err(|e| format!("Serialization error: {}", e))
}

fn recurring_json(window_json: &str, from: &str, to: &str) -> Result<String, String> {
    let window: RecurringWindow = serde_json::from_str(window_json)
        .map_err(|e| format!("Invalid recurring window JSON: {}", e))?;
    let horizon = Interval {
        start: slot_engine::parse_timestamp(from).map_err(|e| e.to_string())?,
        end: slot_engine::parse_timestamp(to).map_err(|e| e.to_string())?,
    };

    let windows =
        slot_engine::expand_recurring_window(&window, horizon).map_err(|e| e.to_string())?;
    slots_json(&windows)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Merge overlapping or back-to-back intervals into disjoint busy blocks.
///
/// `intervals_json` is a JSON array of `{start, end}` objects. Returns a JSON
/// array of `{start, end, duration_minutes}` sorted by start.
#[wasm_bindgen(js_name = "mergeIntervals")]
pub fn merge_intervals(intervals_json: &str) -> Result<String, JsValue> {
    merge_json(intervals_json).map_err(|e| JsValue::from_str(&e))
}

/// Compute free slots of at least `min_duration_minutes` within the availability
/// windows, avoiding every busy interval.
#[wasm_bindgen(js_name = "computeFreeSlots")]
pub fn compute_free_slots(
    availability_json: &str,
    busy_json: &str,
    min_duration_minutes: i64,
) -> Result<String, JsValue> {
    free_slots_json(availability_json, busy_json, min_duration_minutes)
        .map_err(|e| JsValue::from_str(&e))
}

/// Cut free slots into hour-aligned start-time suggestions.
///
/// `now` is an ISO 8601 instant supplied by the caller; `timezone` is the IANA
/// zone whose clock hours blocks align to.
#[wasm_bindgen(js_name = "hourlyBlocks")]
pub fn hourly_blocks(
    free_slots_json: &str,
    block_minutes: i64,
    max_blocks: usize,
    now: &str,
    timezone: &str,
) -> Result<String, JsValue> {
    hourly_blocks_json(free_slots_json, block_minutes, max_blocks, now, timezone)
        .map_err(|e| JsValue::from_str(&e))
}

/// Find every overlapping pair between two interval lists.
#[wasm_bindgen(js_name = "findOverlaps")]
pub fn find_overlaps(a_json: &str, b_json: &str) -> Result<String, JsValue> {
    overlaps_json(a_json, b_json).map_err(|e| JsValue::from_str(&e))
}

/// Expand a recurring availability window within `[from, to)`.
///
/// `window_json` is `{rrule, dtstart, duration_minutes, timezone, exdates?}`.
#[wasm_bindgen(js_name = "expandRecurringWindow")]
pub fn expand_recurring_window(window_json: &str, from: &str, to: &str) -> Result<String, JsValue> {
    recurring_json(window_json, from, to).map_err(|e| JsValue::from_str(&e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn parse(json: &str) -> Vec<Value> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn free_slots_roundtrip_through_json() {
        let availability = r#"[{"start":"2026-03-01T09:00:00Z","end":"2026-03-01T12:00:00Z"}]"#;
        let busy = r#"[{"start":"2026-03-01T10:00:00Z","end":"2026-03-01T10:30:00Z"}]"#;

        let slots = parse(&free_slots_json(availability, busy, 60).unwrap());

        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0]["end"], "2026-03-01T10:00:00Z");
        assert_eq!(slots[1]["start"], "2026-03-01T10:30:00Z");
        assert_eq!(slots[1]["duration_minutes"], 90);
    }

    #[test]
    fn host_row_fields_are_ignored() {
        let rows = r#"[{"id":"a1","user_id":"u9","source":"device",
            "start":"2026-03-01T08:00:00Z","end":"2026-03-01T09:00:00Z"}]"#;

        let merged = parse(&merge_json(rows).unwrap());

        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn errors_surface_as_messages() {
        let bad = r#"[{"start":"2026-03-01T10:00:00Z","end":"2026-03-01T09:00:00Z"}]"#;

        let err = merge_json(bad).unwrap_err();

        assert!(err.contains("Invalid interval"), "got: {}", err);
        assert!(free_slots_json("[]", "[]", 0).is_err());
        assert!(merge_json("{").unwrap_err().contains("Invalid intervals JSON"));
    }

    #[test]
    fn out_of_range_minutes_are_errors_not_traps() {
        let window = r#"[{"start":"2026-03-01T09:00:00Z","end":"2026-03-01T12:00:00Z"}]"#;

        let err = free_slots_json(window, "[]", i64::MAX).unwrap_err();
        assert!(err.contains("Invalid duration"), "got: {}", err);

        let err = hourly_blocks_json(window, i64::MAX, 5, "2026-03-01T00:00:00Z", "UTC").unwrap_err();
        assert!(err.contains("out of range"), "got: {}", err);
    }

    #[test]
    fn blocks_use_caller_supplied_now() {
        let free = r#"[{"start":"2026-03-01T09:00:00Z","end":"2026-03-01T13:00:00Z"}]"#;

        let blocks = parse(&hourly_blocks_json(free, 60, 5, "2026-03-01T11:05:00Z", "UTC").unwrap());

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0]["start"], "2026-03-01T12:00:00Z");
    }

    #[test]
    fn overlaps_report_minutes() {
        let a = r#"[{"start":"2026-03-01T09:00:00Z","end":"2026-03-01T10:00:00Z"}]"#;
        let b = r#"[{"start":"2026-03-01T09:40:00Z","end":"2026-03-01T11:00:00Z"}]"#;

        let overlaps = parse(&overlaps_json(a, b).unwrap());

        assert_eq!(overlaps[0]["overlap_minutes"], 20);
    }

    #[test]
    fn recurring_window_from_json() {
        let window = r#"{"rrule":"FREQ=DAILY;COUNT=3","dtstart":"2026-03-01T07:00:00",
            "duration_minutes":60,"timezone":"UTC"}"#;

        let windows =
            parse(&recurring_json(window, "2026-03-01T00:00:00Z", "2026-03-10T00:00:00Z").unwrap());

        assert_eq!(windows.len(), 3);
        assert_eq!(windows[2]["start"], "2026-03-03T07:00:00Z");
    }
}
