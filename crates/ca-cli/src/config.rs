//! Configuration loading and management.

use std::path::{Path, PathBuf};

use ca_core::time::{self, to_datetime};
use ca_core::{ChargeResult, ChargeWindow, QueryError, Series, TimeInput, compute_charge_in};
use chrono::{Local, Utc};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Time zone used to render and read date-time text.
///
/// Epoch timestamps are zone-independent; only calendar text changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayZone {
    #[default]
    Local,
    Utc,
}

impl DisplayZone {
    /// Renders `timestamp` as `YYYYMMDD HH:MM:SS.mmm`.
    pub fn timestamp_to_text(self, timestamp: f64) -> Option<String> {
        match self {
            Self::Local => time::timestamp_to_text_in(timestamp, &Local),
            Self::Utc => time::timestamp_to_text_in(timestamp, &Utc),
        }
    }

    /// Renders `timestamp` with an arbitrary `chrono` format string.
    pub fn format(self, timestamp: f64, format: &str) -> Option<String> {
        match self {
            Self::Local => to_datetime(timestamp, &Local).map(|dt| dt.format(format).to_string()),
            Self::Utc => to_datetime(timestamp, &Utc).map(|dt| dt.format(format).to_string()),
        }
    }

    pub fn resolve(self, input: &TimeInput, series: &Series) -> Option<f64> {
        match self {
            Self::Local => input.resolve_in(series, &Local),
            Self::Utc => input.resolve_in(series, &Utc),
        }
    }

    pub fn compute_charge(
        self,
        series: &Series,
        window: &ChargeWindow,
    ) -> Result<ChargeResult, QueryError> {
        match self {
            Self::Local => compute_charge_in(series, window, &Local),
            Self::Utc => compute_charge_in(series, window, &Utc),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Zone for date-time text.
    pub time_zone: DisplayZone,

    /// Decimal places for charges and integrals (mC).
    pub precision: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_zone: DisplayZone::Local,
            precision: 6,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (CA_*)
        figment = figment.merge(Env::prefixed("CA_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for ca.
///
/// On Linux: `~/.config/ca`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("ca"))
}
