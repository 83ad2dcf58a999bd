//! Integral queries and net charge computation.
//!
//! # Algorithm Summary
//!
//! 1. Targets at or before the first sample clamp to the first integral
//! 2. Targets at or after the last sample clamp to the last integral
//! 3. Otherwise the first bracketing pair of samples is linearly interpolated
//! 4. If no pair brackets the target (malformed timestamps), the nearest
//!    sample's integral is used
//!
//! Net charge over a window is the difference of the interpolated integrals
//! at its two ends.

use std::fmt;

use chrono::{Local, TimeZone};
use serde::Serialize;
use thiserror::Error;

use crate::channel::Channel;
use crate::series::{Sample, Series};
use crate::time::TimeInput;

/// Which end of a charge window an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    Start,
    End,
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::End => write!(f, "end"),
        }
    }
}

/// Errors raised when a custom window cannot be evaluated.
///
/// These are recoverable: the loaded [`Series`] stays valid.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QueryError {
    /// Start is not strictly before end.
    #[error("start time {start} must be earlier than end time {end}")]
    Range { start: f64, end: f64 },

    /// None of timestamp, date-time text or runtime could be resolved.
    #[error("no valid {boundary} time: give a timestamp, a date-time or a runtime")]
    MissingTimeInput { boundary: Boundary },
}

/// Net charge delivered over a window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChargeResult {
    /// Channel 1 charge (mC).
    pub channel1_charge: f64,
    /// Channel 2 charge (mC).
    pub channel2_charge: f64,
    /// Resolved start of the window.
    pub start_timestamp: f64,
    /// Resolved end of the window.
    pub end_timestamp: f64,
}

impl ChargeResult {
    /// Returns the charge for `channel`.
    pub const fn charge(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Channel1 => self.channel1_charge,
            Channel::Channel2 => self.channel2_charge,
        }
    }

    /// Window length in seconds.
    pub fn duration(&self) -> f64 {
        self.end_timestamp - self.start_timestamp
    }
}

/// The time window a charge is computed over.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ChargeWindow {
    /// From the first to the last sample.
    #[default]
    Full,
    /// Between two user-supplied instants.
    Custom { start: TimeInput, end: TimeInput },
}

/// Returns the integral for `channel` at `target`.
///
/// Never fails: targets outside the recorded range clamp to the nearest end.
pub fn value_at(series: &Series, target: f64, channel: Channel) -> f64 {
    let samples = series.samples();
    let first = series.first();
    let last = series.last();

    if target <= first.timestamp {
        return first.integral(channel);
    }
    if target >= last.timestamp {
        return last.integral(channel);
    }

    for pair in samples.windows(2) {
        let (lo, hi) = (&pair[0], &pair[1]);
        if lo.timestamp <= target && target <= hi.timestamp {
            let (t1, v1) = (lo.timestamp, lo.integral(channel));
            let (t2, v2) = (hi.timestamp, hi.integral(channel));
            if t1 == t2 {
                return v1;
            }
            return v1 + (v2 - v1) * (target - t1) / (t2 - t1);
        }
    }

    tracing::debug!(target, "no bracketing samples; using nearest sample");
    nearest(series, target).integral(channel)
}

/// Sample whose timestamp is closest to `target`, first one on ties.
fn nearest(series: &Series, target: f64) -> &Sample {
    let mut best = series.first();
    let mut best_distance = (best.timestamp - target).abs();
    for sample in &series.samples()[1..] {
        let distance = (sample.timestamp - target).abs();
        if distance < best_distance {
            best = sample;
            best_distance = distance;
        }
    }
    best
}

/// Computes net charge per channel between two timestamps.
///
/// No ordering is enforced: swapping `start` and `end` negates the result.
pub fn charge_between(series: &Series, start: f64, end: f64) -> ChargeResult {
    let charge = |channel| value_at(series, end, channel) - value_at(series, start, channel);
    ChargeResult {
        channel1_charge: charge(Channel::Channel1),
        channel2_charge: charge(Channel::Channel2),
        start_timestamp: start,
        end_timestamp: end,
    }
}

/// Computes net charge over `window`, parsing date-time text in `tz`.
pub fn compute_charge_in<Tz: TimeZone>(
    series: &Series,
    window: &ChargeWindow,
    tz: &Tz,
) -> Result<ChargeResult, QueryError> {
    let (start, end) = match window {
        ChargeWindow::Full => (series.start_timestamp(), series.end_timestamp()),
        ChargeWindow::Custom { start, end } => {
            let start = start
                .resolve_in(series, tz)
                .ok_or(QueryError::MissingTimeInput {
                    boundary: Boundary::Start,
                })?;
            let end = end
                .resolve_in(series, tz)
                .ok_or(QueryError::MissingTimeInput {
                    boundary: Boundary::End,
                })?;
            if start >= end {
                return Err(QueryError::Range { start, end });
            }
            (start, end)
        }
    };

    let result = charge_between(series, start, end);
    tracing::debug!(?result, "computed charge");
    Ok(result)
}

/// Computes net charge over `window`, parsing date-time text as local time.
pub fn compute_charge(series: &Series, window: &ChargeWindow) -> Result<ChargeResult, QueryError> {
    compute_charge_in(series, window, &Local)
}
