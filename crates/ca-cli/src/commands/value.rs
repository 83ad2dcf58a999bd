//! Value command: interpolated charge integral at one instant.

use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use anyhow::{Result, bail};
use ca_core::{Channel, TimeInput, value_at};
use serde::Serialize;

use super::util::{MISSING, load_series};
use crate::Config;

/// Integral of one channel at the queried instant.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelValue {
    pub channel: Channel,
    pub integral: f64,
}

/// JSON shape of a value query.
#[derive(Debug, Serialize)]
struct ValueReport<'a> {
    timestamp: f64,
    time: Option<String>,
    values: &'a [ChannelValue],
}

/// Runs the value command.
pub fn run<W: Write>(
    writer: &mut W,
    path: &Path,
    config: &Config,
    at: &TimeInput,
    channel: Option<Channel>,
    json: bool,
) -> Result<()> {
    let series = load_series(path)?;
    let Some(timestamp) = config.time_zone.resolve(at, &series) else {
        bail!("no valid time: give --timestamp, --time or --runtime");
    };

    let channels = channel.map_or_else(|| Channel::ALL.to_vec(), |c| vec![c]);
    let values: Vec<ChannelValue> = channels
        .into_iter()
        .map(|channel| ChannelValue {
            channel,
            integral: value_at(&series, timestamp, channel),
        })
        .collect();
    let time = config.time_zone.timestamp_to_text(timestamp);

    if json {
        let report = ValueReport {
            timestamp,
            time,
            values: &values,
        };
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    let mut output = String::new();
    writeln!(
        output,
        "At: {} (UTC: {timestamp:.1})",
        time.as_deref().unwrap_or(MISSING)
    )
    .unwrap();
    for value in &values {
        let label = match value.channel {
            Channel::Channel1 => "Channel 1",
            Channel::Channel2 => "Channel 2",
        };
        writeln!(
            output,
            "{label} Integral: {:.precision$} mC",
            value.integral,
            precision = config.precision
        )
        .unwrap();
    }
    write!(writer, "{output}")?;
    Ok(())
}
