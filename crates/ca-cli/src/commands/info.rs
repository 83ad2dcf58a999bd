//! Info command for summarizing a record file.
//!
//! Shows the channel layout, sample count, start and end time and the total
//! runtime of a loaded log.

use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use ca_core::Series;
use serde::Serialize;

use super::util::{MISSING, display_name, load_series};
use crate::{Config, DisplayZone};

/// Calendar format for start/end times.
const CALENDAR_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Summary of a loaded record file.
#[derive(Debug, Clone, Serialize)]
pub struct FileSummary {
    pub file: String,
    pub dual_channel: bool,
    pub samples: usize,
    pub start_timestamp: f64,
    pub end_timestamp: f64,
    pub total_runtime: f64,
    #[serde(skip)]
    pub start_calendar: Option<String>,
    #[serde(skip)]
    pub end_calendar: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

/// Builds the summary of `series`.
pub fn summarize(file: String, series: &Series, zone: DisplayZone) -> FileSummary {
    let start = series.start_timestamp();
    let end = series.end_timestamp();
    FileSummary {
        file,
        dual_channel: series.is_dual_channel(),
        samples: series.len(),
        start_timestamp: start,
        end_timestamp: end,
        total_runtime: series.total_runtime(),
        start_calendar: zone.format(start, CALENDAR_FORMAT),
        end_calendar: zone.format(end, CALENDAR_FORMAT),
        start_time: zone.timestamp_to_text(start),
        end_time: zone.timestamp_to_text(end),
    }
}

/// Formats the summary for human-readable output.
pub fn format_summary(summary: &FileSummary) -> String {
    let mut output = String::new();
    let channels = if summary.dual_channel {
        "dual"
    } else {
        "single"
    };

    writeln!(output, "File: {}", summary.file).unwrap();
    writeln!(output, "Channels: {channels}").unwrap();
    writeln!(output, "Samples: {}", summary.samples).unwrap();
    writeln!(
        output,
        "Start Time: {} (UTC: {:.1})",
        summary.start_calendar.as_deref().unwrap_or(MISSING),
        summary.start_timestamp
    )
    .unwrap();
    writeln!(
        output,
        "End Time: {} (UTC: {:.1})",
        summary.end_calendar.as_deref().unwrap_or(MISSING),
        summary.end_timestamp
    )
    .unwrap();
    writeln!(output, "Total Runtime: {:.3} seconds", summary.total_runtime).unwrap();
    output
}

/// Runs the info command.
pub fn run<W: Write>(writer: &mut W, path: &Path, config: &Config, json: bool) -> Result<()> {
    let series = load_series(path)?;
    let summary = summarize(display_name(path), &series, config.time_zone);

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&summary)?)?;
    } else {
        write!(writer, "{}", format_summary(&summary))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    use crate::commands::util::fixtures;

    fn utc_config() -> Config {
        Config {
            time_zone: DisplayZone::Utc,
            ..Config::default()
        }
    }

    #[test]
    fn info_human_output() {
        let temp = tempfile::tempdir().unwrap();
        let path = fixtures::write_dual(temp.path());

        let mut output = Vec::new();
        run(&mut output, &path, &utc_config(), false).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @r"
        File: run.csv
        Channels: dual
        Samples: 4
        Start Time: 1970-01-01 00:01:40 (UTC: 100.0)
        End Time: 1970-01-01 00:01:46 (UTC: 106.0)
        Total Runtime: 6.000 seconds
        ");
    }

    #[test]
    fn info_json_output() {
        let temp = tempfile::tempdir().unwrap();
        let path = fixtures::write_dual(temp.path());

        let mut output = Vec::new();
        run(&mut output, &path, &utc_config(), true).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @r#"
        {
          "file": "run.csv",
          "dual_channel": true,
          "samples": 4,
          "start_timestamp": 100.0,
          "end_timestamp": 106.0,
          "total_runtime": 6.0,
          "start_time": "19700101 00:01:40.000",
          "end_time": "19700101 00:01:46.000"
        }
        "#);
    }

    #[test]
    fn single_channel_summary() {
        let series = ca_core::parse(&format!(
            "{}\n10.0,0.0,0.5,0.0\n11.5,1.5,0.6,0.9\n",
            ca_core::SINGLE_CHANNEL_HEADER
        ))
        .unwrap();
        let summary = summarize("legacy.csv".to_string(), &series, DisplayZone::Utc);
        let output = format_summary(&summary);
        assert!(output.contains("Channels: single"));
        assert!(output.contains("Total Runtime: 1.500 seconds"));
    }
}
