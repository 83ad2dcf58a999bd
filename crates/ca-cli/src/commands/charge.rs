//! Charge command for computing net charge per channel.
//!
//! Without boundary flags the whole file is used; otherwise both ends of a
//! custom window must resolve and the start must precede the end.

use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use ca_core::{ChargeResult, ChargeWindow};
use serde::Serialize;

use super::util::{MISSING, display_name, load_series};
use crate::{Config, DisplayZone};

/// Clock format for the time range line.
const RANGE_FORMAT: &str = "%H:%M:%S";

/// JSON shape of a charge computation.
#[derive(Debug, Serialize)]
struct ChargeReport<'a> {
    file: String,
    dual_channel: bool,
    #[serde(flatten)]
    result: &'a ChargeResult,
    duration_seconds: f64,
}

/// Formats a charge result for human-readable output.
pub fn format_charge(result: &ChargeResult, zone: DisplayZone, precision: usize) -> String {
    let mut output = String::new();
    let start = zone.format(result.start_timestamp, RANGE_FORMAT);
    let end = zone.format(result.end_timestamp, RANGE_FORMAT);

    writeln!(
        output,
        "Channel 1 Charge: {:.precision$} mC",
        result.channel1_charge
    )
    .unwrap();
    writeln!(
        output,
        "Channel 2 Charge: {:.precision$} mC",
        result.channel2_charge
    )
    .unwrap();
    writeln!(
        output,
        "Time range: {} to {} (duration {:.1}s)",
        start.as_deref().unwrap_or(MISSING),
        end.as_deref().unwrap_or(MISSING),
        result.duration()
    )
    .unwrap();
    output
}

/// Runs the charge command.
pub fn run<W: Write>(
    writer: &mut W,
    path: &Path,
    config: &Config,
    window: &ChargeWindow,
    json: bool,
) -> Result<()> {
    let series = load_series(path)?;
    let result = config
        .time_zone
        .compute_charge(&series, window)
        .context("invalid time range")?;

    if json {
        let report = ChargeReport {
            file: display_name(path),
            dual_channel: series.is_dual_channel(),
            result: &result,
            duration_seconds: result.duration(),
        };
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        write!(
            writer,
            "{}",
            format_charge(&result, config.time_zone, config.precision)
        )?;
    }
    Ok(())
}
