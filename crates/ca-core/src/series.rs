//! Sample series loaded from a single monitor log.

use crate::channel::Channel;

/// One record point from the log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Absolute epoch seconds.
    pub timestamp: f64,
    /// Elapsed seconds since the first sample, as recorded by the monitor.
    pub runtime: f64,
    /// Instantaneous channel 1 current (mA).
    pub channel1_current: f64,
    /// Instantaneous channel 2 current (mA), zero for single-channel logs.
    pub channel2_current: f64,
    /// Cumulative channel 1 charge (mC).
    pub channel1_integral: f64,
    /// Cumulative channel 2 charge (mC), zero for single-channel logs.
    pub channel2_integral: f64,
}

impl Sample {
    /// Returns the recorded integral for `channel`.
    pub const fn integral(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Channel1 => self.channel1_integral,
            Channel::Channel2 => self.channel2_integral,
        }
    }
}

/// An ordered, non-empty sequence of samples from one monitoring session.
///
/// A `Series` is immutable once built. Callers hold it for the lifetime of an
/// analysis session and pass it explicitly into every query.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    samples: Vec<Sample>,
    is_dual_channel: bool,
}

impl Series {
    /// Builds a series from samples in file order.
    ///
    /// Returns `None` when `samples` is empty.
    pub fn new(samples: Vec<Sample>, is_dual_channel: bool) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        Some(Self {
            samples,
            is_dual_channel,
        })
    }

    /// All samples in file order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Number of samples (always at least one).
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub const fn is_dual_channel(&self) -> bool {
        self.is_dual_channel
    }

    pub fn first(&self) -> &Sample {
        &self.samples[0]
    }

    pub fn last(&self) -> &Sample {
        &self.samples[self.samples.len() - 1]
    }

    /// Timestamp of the first sample.
    pub fn start_timestamp(&self) -> f64 {
        self.first().timestamp
    }

    /// Timestamp of the last sample.
    pub fn end_timestamp(&self) -> f64 {
        self.last().timestamp
    }

    /// Runtime recorded on the last sample.
    pub fn total_runtime(&self) -> f64 {
        self.last().runtime
    }
}
