//! Convert command: one instant in all three representations.

use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use anyhow::{Result, bail};
use ca_core::TimeInput;
use ca_core::time::timestamp_to_runtime;

use super::util::{MISSING, load_series};
use crate::{Config, DisplayZone};

/// Formats `timestamp` as timestamp, date-time text and runtime.
pub fn format_instant(timestamp: f64, runtime: f64, zone: DisplayZone) -> String {
    let mut output = String::new();
    let text = zone.timestamp_to_text(timestamp);

    writeln!(output, "UTC Timestamp: {timestamp:.1}").unwrap();
    writeln!(output, "Date-Time: {}", text.as_deref().unwrap_or(MISSING)).unwrap();
    writeln!(output, "Run Time: {runtime:.3} seconds").unwrap();
    output
}

/// Runs the convert command.
pub fn run<W: Write>(writer: &mut W, path: &Path, config: &Config, at: &TimeInput) -> Result<()> {
    let series = load_series(path)?;
    let Some(timestamp) = config.time_zone.resolve(at, &series) else {
        bail!("no valid time: give --timestamp, --time or --runtime");
    };
    let runtime = timestamp_to_runtime(timestamp, &series);

    write!(
        writer,
        "{}",
        format_instant(timestamp, runtime, config.time_zone)
    )?;
    Ok(())
}
