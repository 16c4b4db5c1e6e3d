//! Integration tests for the `slots` CLI binary.
//!
//! These drive the real binary with `assert_cmd`, covering stdin/stdout piping,
//! file input, config defaults and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn snapshot_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/snapshot.json")
}

fn config_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/config.toml")
}

fn slots() -> Command {
    Command::cargo_bin("slots").unwrap()
}

fn stdout_json(output: &[u8]) -> Vec<Value> {
    serde_json::from_slice(output).expect("stdout must be a JSON array")
}

// ─────────────────────────────────────────────────────────────────────────────
// merge
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn merge_stdin_to_stdout() {
    let input = r#"[
        {"start":"2026-03-01T08:00:00Z","end":"2026-03-01T09:00:00Z"},
        {"start":"2026-03-01T09:00:00Z","end":"2026-03-01T10:00:00Z"},
        {"start":"2026-03-01T09:30:00Z","end":"2026-03-01T09:45:00Z"}
    ]"#;

    let output = slots()
        .arg("merge")
        .write_stdin(input)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let merged = stdout_json(&output);
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0]["start"], "2026-03-01T08:00:00Z");
    assert_eq!(merged[0]["end"], "2026-03-01T10:00:00Z");
    assert_eq!(merged[0]["duration_minutes"], 120);
}

#[test]
fn merge_accepts_naive_timestamps_as_utc() {
    let input = r#"[{"start":"2026-03-01T08:00:00","end":"2026-03-01T09:00:00"}]"#;

    slots()
        .arg("merge")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("2026-03-01T08:00:00Z"));
}

#[test]
fn merge_rejects_inverted_interval() {
    let input = r#"[{"start":"2026-03-01T10:00:00Z","end":"2026-03-01T09:00:00Z"}]"#;

    slots()
        .arg("merge")
        .write_stdin(input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid interval"));
}

// ─────────────────────────────────────────────────────────────────────────────
// free
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn free_from_file_with_explicit_minimum() {
    let output = slots()
        .args(["free", "--min-duration", "60", "-i", snapshot_path()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let free = stdout_json(&output);
    let starts: Vec<&str> = free.iter().map(|s| s["start"].as_str().unwrap()).collect();
    assert_eq!(
        starts,
        vec![
            "2026-03-01T09:00:00Z",
            "2026-03-01T10:30:00Z",
            "2026-03-01T17:45:00Z"
        ]
    );
}

#[test]
fn free_uses_config_default_minimum() {
    let output = slots()
        .args(["free", "--config", config_path(), "-i", snapshot_path()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let free = stdout_json(&output);
    assert_eq!(free.len(), 1);
    assert_eq!(free[0]["start"], "2026-03-01T10:30:00Z");
    assert_eq!(free[0]["duration_minutes"], 90);
}

#[test]
fn free_rejects_zero_minimum() {
    slots()
        .args(["free", "--min-duration", "0", "-i", snapshot_path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid duration"));
}

#[test]
fn free_rejects_out_of_range_minimum() {
    slots()
        .args(["free", "--min-duration", "9223372036854775807", "-i", snapshot_path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn free_writes_output_file() {
    let output_path = std::env::temp_dir().join("slots-test-free-output.json");
    let _ = std::fs::remove_file(&output_path);

    slots()
        .args(["free", "-i", snapshot_path(), "-o"])
        .arg(&output_path)
        .assert()
        .success();

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    let free: Vec<Value> = serde_json::from_str(&content).unwrap();
    assert_eq!(free.len(), 3);

    let _ = std::fs::remove_file(&output_path);
}

#[test]
fn free_reports_invalid_json() {
    slots()
        .arg("free")
        .write_stdin("not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid JSON"));
}

// ─────────────────────────────────────────────────────────────────────────────
// blocks
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn blocks_respect_now_and_cap() {
    let input = r#"[
        {"start":"2026-03-01T09:00:00Z","end":"2026-03-01T13:00:00Z"},
        {"start":"2026-03-01T15:00:00Z","end":"2026-03-01T18:00:00Z"}
    ]"#;

    let output = slots()
        .args([
            "blocks",
            "--block",
            "60",
            "--max",
            "3",
            "--now",
            "2026-03-01T10:20:00Z",
            "--tz",
            "UTC",
        ])
        .write_stdin(input)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let blocks = stdout_json(&output);
    let starts: Vec<&str> = blocks.iter().map(|b| b["start"].as_str().unwrap()).collect();
    assert_eq!(
        starts,
        vec![
            "2026-03-01T11:00:00Z",
            "2026-03-01T12:00:00Z",
            "2026-03-01T15:00:00Z"
        ]
    );
}

#[test]
fn blocks_reject_out_of_range_block() {
    slots()
        .args(["blocks", "--block", "9223372036854775807", "--tz", "UTC"])
        .write_stdin("[]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn blocks_reject_unknown_timezone() {
    slots()
        .args(["blocks", "--tz", "Nowhere/Special"])
        .write_stdin("[]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown timezone"));
}

// ─────────────────────────────────────────────────────────────────────────────
// expand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn expand_weekly_window() {
    let output = slots()
        .args([
            "expand",
            "--rrule",
            "FREQ=WEEKLY;BYDAY=TU",
            "--dtstart",
            "2026-03-17T18:00:00",
            "--duration",
            "120",
            "--tz",
            "Europe/Berlin",
            "--from",
            "2026-03-16T00:00:00Z",
            "--to",
            "2026-04-01T00:00:00Z",
            "--exdate",
            "2026-03-24T18:00:00",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let windows = stdout_json(&output);
    assert_eq!(windows.len(), 2);
    assert_eq!(windows[0]["start"], "2026-03-17T17:00:00Z");
    assert_eq!(windows[1]["start"], "2026-03-31T16:00:00Z");
}

#[test]
fn no_subcommand_shows_usage() {
    slots()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
