//! Channel selector for integral queries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the two monitor channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Channel1,
    Channel2,
}

impl Channel {
    /// Both channels, in display order.
    pub const ALL: [Self; 2] = [Self::Channel1, Self::Channel2];

    /// Short name used in output and on the command line.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Channel1 => "ch1",
            Self::Channel2 => "ch2",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Channel {
    type Err = UnknownChannel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "ch1" | "channel1" => Ok(Self::Channel1),
            "2" | "ch2" | "channel2" => Ok(Self::Channel2),
            _ => Err(UnknownChannel(s.to_string())),
        }
    }
}

impl Serialize for Channel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Channel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown channel strings.
#[derive(Debug, Clone)]
pub struct UnknownChannel(String);

impl fmt::Display for UnknownChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown channel: {} (expected ch1 or ch2)", self.0)
    }
}

impl std::error::Error for UnknownChannel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_all_variants() {
        for variant in &Channel::ALL {
            let s = variant.to_string();
            let parsed: Channel = s.parse().expect("should parse");
            assert_eq!(parsed, *variant, "roundtrip failed for {variant:?}");
        }
    }

    #[test]
    fn long_and_numeric_aliases_parse() {
        assert_eq!("1".parse::<Channel>().unwrap(), Channel::Channel1);
        assert_eq!("Channel2".parse::<Channel>().unwrap(), Channel::Channel2);
        assert_eq!(" CH2 ".parse::<Channel>().unwrap(), Channel::Channel2);
    }

    #[test]
    fn unknown_channel_errors() {
        let err = "ch3".parse::<Channel>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown channel: ch3 (expected ch1 or ch2)"
        );
    }
}
