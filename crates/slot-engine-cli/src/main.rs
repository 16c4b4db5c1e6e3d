//! `slots` CLI — merge busy blocks, resolve free slots and suggest start times
//! from JSON snapshots on the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Merge raw calendar events into busy blocks (stdin → stdout)
//! echo '[{"start":"2026-03-01T08:00:00Z","end":"2026-03-01T09:00:00Z"}]' | slots merge
//!
//! # Free slots of at least 90 minutes
//! slots free --min-duration 90 -i snapshot.json
//!
//! # Up to 5 hour-aligned 60-minute start times, Berlin clock
//! slots blocks --block 60 --max 5 --tz Europe/Berlin -i free.json
//!
//! # Expand a recurring availability declaration
//! slots expand --rrule "FREQ=WEEKLY;BYDAY=TU" --dtstart 2026-03-17T18:00:00 \
//!   --duration 120 --tz Europe/Berlin --from 2026-03-16T00:00:00Z --to 2026-04-01T00:00:00Z
//! ```
//!
//! Logging goes to stderr and honours `RUST_LOG`; `-v` forces debug output.

mod config;

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use slot_engine::{Interval, RecurringWindow};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Free-slot engine for match scheduling"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML config file with default durations and timezone
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge overlapping or back-to-back intervals into disjoint busy blocks
    Merge {
        #[command(flatten)]
        io: IoArgs,
    },
    /// Compute free slots from {"availability": [...], "busy": [...]}
    Free {
        #[command(flatten)]
        io: IoArgs,
        /// Minimum slot length in minutes
        #[arg(long)]
        min_duration: Option<i64>,
    },
    /// Cut free slots into hour-aligned start-time suggestions
    Blocks {
        #[command(flatten)]
        io: IoArgs,
        /// Block length in minutes
        #[arg(long)]
        block: Option<i64>,
        /// Maximum number of blocks to return
        #[arg(long)]
        max: Option<usize>,
        /// Reference instant; blocks starting before it are skipped (defaults to now)
        #[arg(long)]
        now: Option<String>,
        /// IANA timezone whose clock hours the blocks align to
        #[arg(long)]
        tz: Option<String>,
    },
    /// Expand a recurring availability window into concrete intervals
    Expand {
        /// RFC 5545 RRULE body (e.g. "FREQ=WEEKLY;BYDAY=TU,TH")
        #[arg(long)]
        rrule: String,
        /// Local start of the first occurrence (e.g. 2026-03-17T18:00:00)
        #[arg(long)]
        dtstart: String,
        /// Occurrence length in minutes
        #[arg(long)]
        duration: u32,
        /// IANA timezone of dtstart
        #[arg(long)]
        tz: Option<String>,
        /// Horizon start
        #[arg(long)]
        from: String,
        /// Horizon end
        #[arg(long)]
        to: String,
        /// Local start of an occurrence to skip (repeatable)
        #[arg(long)]
        exdate: Vec<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(clap::Args)]
struct IoArgs {
    /// Input JSON file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
}

/// Interval as it appears in input JSON; timestamps go through
/// [`slot_engine::parse_timestamp`] so naive strings are accepted as UTC.
#[derive(Deserialize)]
struct IntervalInput {
    start: String,
    end: String,
}

#[derive(Deserialize)]
struct FreeRequest {
    availability: Vec<IntervalInput>,
    #[serde(default)]
    busy: Vec<IntervalInput>,
}

#[derive(Serialize)]
struct SlotOutput {
    start: String,
    end: String,
    duration_minutes: i64,
}

impl From<&Interval> for SlotOutput {
    fn from(i: &Interval) -> Self {
        Self {
            start: i.start.to_rfc3339_opts(SecondsFormat::Secs, true),
            end: i.end.to_rfc3339_opts(SecondsFormat::Secs, true),
            duration_minutes: i.duration_minutes(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    let defaults = config.defaults;

    match cli.command {
        Commands::Merge { io } => {
            let input: Vec<IntervalInput> = read_json(io.input.as_deref())?;
            let intervals = to_intervals(input)?;
            let merged =
                slot_engine::merge_intervals(&intervals).context("Failed to merge intervals")?;
            write_slots(io.output.as_deref(), &merged)?;
        }
        Commands::Free { io, min_duration } => {
            let request: FreeRequest = read_json(io.input.as_deref())?;
            let availability = to_intervals(request.availability)?;
            let busy = to_intervals(request.busy)?;
            let min_duration = slot_engine::duration_from_minutes(
                min_duration.unwrap_or(defaults.min_duration_minutes),
            )?;

            let slots = slot_engine::compute_free_slots(&availability, &busy, min_duration)
                .context("Failed to compute free slots")?;
            write_slots(io.output.as_deref(), &slots)?;
        }
        Commands::Blocks {
            io,
            block,
            max,
            now,
            tz,
        } => {
            let input: Vec<IntervalInput> = read_json(io.input.as_deref())?;
            let free = to_intervals(input)?;
            let tz = parse_tz(tz.as_deref().unwrap_or(&defaults.timezone))?;
            let now = match now {
                Some(raw) => parse_instant(&raw)?,
                None => Utc::now(),
            };
            let block =
                slot_engine::duration_from_minutes(block.unwrap_or(defaults.block_minutes))?;
            let max = max.unwrap_or(defaults.max_blocks);

            let blocks = slot_engine::hourly_blocks(&free, block, max, now, tz)
                .context("Failed to build hourly blocks")?;
            write_slots(io.output.as_deref(), &blocks)?;
        }
        Commands::Expand {
            rrule,
            dtstart,
            duration,
            tz,
            from,
            to,
            exdate,
            output,
        } => {
            let window = RecurringWindow {
                rrule,
                dtstart,
                duration_minutes: duration,
                timezone: tz.unwrap_or(defaults.timezone),
                exdates: exdate,
            };
            let horizon = Interval {
                start: parse_instant(&from)?,
                end: parse_instant(&to)?,
            };

            let windows = slot_engine::expand_recurring_window(&window, horizon)
                .context("Failed to expand recurring window")?;
            write_slots(output.as_deref(), &windows)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn parse_instant(raw: &str) -> Result<DateTime<Utc>> {
    Ok(slot_engine::parse_timestamp(raw)?)
}

fn parse_tz(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| anyhow::anyhow!("Unknown timezone: '{}'", name))
}

fn to_intervals(inputs: Vec<IntervalInput>) -> Result<Vec<Interval>> {
    inputs
        .into_iter()
        .map(|input| {
            Ok(Interval {
                start: parse_instant(&input.start)?,
                end: parse_instant(&input.end)?,
            })
        })
        .collect()
}

fn read_json<T: DeserializeOwned>(path: Option<&str>) -> Result<T> {
    let raw = read_input(path)?;
    serde_json::from_str(&raw).context("Input is not valid JSON for this command")
}

fn write_slots(path: Option<&str>, intervals: &[Interval]) -> Result<()> {
    let out: Vec<SlotOutput> = intervals.iter().map(SlotOutput::from).collect();
    let mut json = serde_json::to_string_pretty(&out)?;
    json.push('\n');
    tracing::debug!(count = out.len(), "writing result");
    write_output(path, &json)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
