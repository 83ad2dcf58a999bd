//! Conversions between the three representations of an instant.
//!
//! An instant in a loaded log can be given as an absolute epoch timestamp,
//! as calendar text (`YYYYMMDD HH:MM:SS.mmm` and friends), or as a runtime
//! offset from the first sample. All three are interchangeable once a
//! [`Series`] anchors the runtime origin.
//!
//! Calendar text is local time by default. Every function that touches the
//! calendar has an `_in` variant taking an explicit [`TimeZone`].

use std::fmt;

use chrono::{DateTime, Local, LocalResult, NaiveDateTime, TimeZone};

use crate::series::Series;

/// Format produced by [`timestamp_to_text`].
const TEXT_FORMAT: &str = "%Y%m%d %H:%M:%S%.3f";

/// Most fractional-second digits accepted in input text.
const MAX_FRACTION_DIGITS: usize = 6;

/// Accepted input formats, tried in order.
const INPUT_FORMATS: [&str; 4] = [
    "%Y%m%d %H:%M:%S%.f",
    "%Y%m%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Converts epoch seconds to a date-time in `tz`.
///
/// The fractional part is rounded to whole microseconds first, so values such
/// as `…06.8` that are stored as `…06.7999999` land on `.800000`.
/// Returns `None` for non-finite or out-of-range input.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "seconds are floored and microseconds are in 0..1_000_000"
)]
pub fn to_datetime<Tz: TimeZone>(timestamp: f64, tz: &Tz) -> Option<DateTime<Tz>> {
    if !timestamp.is_finite() {
        return None;
    }
    let mut secs = timestamp.floor();
    let mut micros = ((timestamp - secs) * 1_000_000.0).round();
    if micros >= 1_000_000.0 {
        secs += 1.0;
        micros = 0.0;
    }
    let utc = DateTime::from_timestamp(secs as i64, micros as u32 * 1_000)?;
    Some(utc.with_timezone(tz))
}

/// Converts a date-time back to epoch seconds.
#[expect(
    clippy::cast_precision_loss,
    reason = "epoch seconds fit comfortably in an f64 mantissa"
)]
pub fn epoch_seconds<Tz: TimeZone>(dt: &DateTime<Tz>) -> f64 {
    dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_nanos()) / 1e9
}

/// Renders `timestamp` as `YYYYMMDD HH:MM:SS.mmm` in `tz`.
///
/// Milliseconds are truncated, not rounded.
pub fn timestamp_to_text_in<Tz>(timestamp: f64, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    to_datetime(timestamp, tz).map(|dt| dt.format(TEXT_FORMAT).to_string())
}

/// Renders `timestamp` as local `YYYYMMDD HH:MM:SS.mmm`.
pub fn timestamp_to_text(timestamp: f64) -> Option<String> {
    timestamp_to_text_in(timestamp, &Local)
}

/// Parses calendar text in `tz` into epoch seconds.
///
/// Accepts `YYYYMMDD HH:MM:SS[.ffffff]` and `YYYY-MM-DD HH:MM:SS[.ffffff]`.
/// Ambiguous local times resolve to the earlier instant; local times that do
/// not exist (DST gap) yield `None`.
pub fn text_to_timestamp_in<Tz: TimeZone>(text: &str, tz: &Tz) -> Option<f64> {
    let text = text.trim();
    if text
        .rsplit_once('.')
        .is_some_and(|(_, fraction)| fraction.len() > MAX_FRACTION_DIGITS)
    {
        return None;
    }
    let naive = INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())?;

    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Some(epoch_seconds(&dt)),
        LocalResult::None => None,
    }
}

/// Parses local calendar text into epoch seconds.
pub fn text_to_timestamp(text: &str) -> Option<f64> {
    text_to_timestamp_in(text, &Local)
}

/// Converts a runtime offset into an absolute timestamp.
pub fn runtime_to_timestamp(runtime: f64, series: &Series) -> f64 {
    series.start_timestamp() + runtime
}

/// Converts an absolute timestamp into a runtime offset.
pub fn timestamp_to_runtime(timestamp: f64, series: &Series) -> f64 {
    timestamp - series.start_timestamp()
}

/// Candidate representations of one instant, as entered by a user.
///
/// When several are present, the timestamp wins over the text, and the text
/// wins over the runtime.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeInput {
    pub timestamp: Option<f64>,
    pub text: Option<String>,
    pub runtime: Option<f64>,
}

impl TimeInput {
    pub const fn from_timestamp(timestamp: f64) -> Self {
        Self {
            timestamp: Some(timestamp),
            text: None,
            runtime: None,
        }
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            timestamp: None,
            text: Some(text.into()),
            runtime: None,
        }
    }

    pub const fn from_runtime(runtime: f64) -> Self {
        Self {
            timestamp: None,
            text: None,
            runtime: Some(runtime),
        }
    }

    /// True when no representation was supplied.
    pub fn is_empty(&self) -> bool {
        self.timestamp.is_none()
            && self.text.as_deref().is_none_or(|t| t.trim().is_empty())
            && self.runtime.is_none()
    }

    /// Resolves to a timestamp, parsing text in `tz`.
    ///
    /// Only the first supplied candidate is considered. If it is unusable
    /// (non-finite number, text in no accepted format) the result is `None`
    /// even when a later candidate would resolve.
    pub fn resolve_in<Tz: TimeZone>(&self, series: &Series, tz: &Tz) -> Option<f64> {
        if let Some(timestamp) = self.timestamp {
            return timestamp.is_finite().then_some(timestamp);
        }
        if let Some(text) = self.text.as_deref().filter(|t| !t.trim().is_empty()) {
            return text_to_timestamp_in(text, tz);
        }
        self.runtime
            .filter(|r| r.is_finite())
            .map(|runtime| runtime_to_timestamp(runtime, series))
    }

    /// Resolves to a timestamp, parsing text as local time.
    pub fn resolve(&self, series: &Series) -> Option<f64> {
        self.resolve_in(series, &Local)
    }
}
