//! Command-line argument definitions.

use std::path::PathBuf;

use ca_core::{Channel, ChargeWindow, TimeInput};
use clap::{Args, Parser, Subcommand};

/// Current record analyzer.
///
/// Loads a current monitor log and computes the net charge delivered between
/// two instants by interpolating the recorded charge integrals.
#[derive(Debug, Parser)]
#[command(name = "ca", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show start, end and runtime of a record file.
    Info {
        /// The record file (.csv).
        file: PathBuf,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Compute net charge per channel, over the whole file or a custom window.
    Charge {
        /// The record file (.csv).
        file: PathBuf,

        #[command(flatten)]
        window: WindowArgs,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show one instant as timestamp, date-time and runtime.
    Convert {
        /// The record file (.csv).
        file: PathBuf,

        #[command(flatten)]
        at: InstantArgs,
    },

    /// Show the interpolated charge integral at one instant.
    Value {
        /// The record file (.csv).
        file: PathBuf,

        #[command(flatten)]
        at: InstantArgs,

        /// Only show this channel (ch1 or ch2).
        #[arg(long)]
        channel: Option<Channel>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// A single instant, given in any of three forms.
#[derive(Debug, Clone, Default, Args)]
pub struct InstantArgs {
    /// Absolute UTC epoch timestamp in seconds (e.g. 1752638106.8).
    #[arg(long, allow_hyphen_values = true)]
    pub timestamp: Option<f64>,

    /// Date-time, e.g. "20250716 11:55:06.800" or "2025-07-16 11:55:06".
    #[arg(long)]
    pub time: Option<String>,

    /// Seconds since the first sample.
    #[arg(long, allow_hyphen_values = true)]
    pub runtime: Option<f64>,
}

impl InstantArgs {
    pub fn to_input(&self) -> TimeInput {
        TimeInput {
            timestamp: self.timestamp,
            text: self.time.clone(),
            runtime: self.runtime,
        }
    }
}

/// Window boundaries. Omit all of them to use the whole file.
#[derive(Debug, Clone, Default, Args)]
pub struct WindowArgs {
    /// Window start as a UTC epoch timestamp.
    #[arg(long, allow_hyphen_values = true)]
    pub start_timestamp: Option<f64>,

    /// Window start as a date-time.
    #[arg(long)]
    pub start_time: Option<String>,

    /// Window start as seconds since the first sample.
    #[arg(long, allow_hyphen_values = true)]
    pub start_runtime: Option<f64>,

    /// Window end as a UTC epoch timestamp.
    #[arg(long, allow_hyphen_values = true)]
    pub end_timestamp: Option<f64>,

    /// Window end as a date-time.
    #[arg(long)]
    pub end_time: Option<String>,

    /// Window end as seconds since the first sample.
    #[arg(long, allow_hyphen_values = true)]
    pub end_runtime: Option<f64>,
}

impl WindowArgs {
    /// Builds the charge window, falling back to the full range when no
    /// boundary was given.
    pub fn to_window(&self) -> ChargeWindow {
        let start = TimeInput {
            timestamp: self.start_timestamp,
            text: self.start_time.clone(),
            runtime: self.start_runtime,
        };
        let end = TimeInput {
            timestamp: self.end_timestamp,
            text: self.end_time.clone(),
            runtime: self.end_runtime,
        };
        if start.is_empty() && end.is_empty() {
            ChargeWindow::Full
        } else {
            ChargeWindow::Custom { start, end }
        }
    }
}
