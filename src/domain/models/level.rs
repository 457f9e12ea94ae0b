//! Severity levels.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::domain::errors::LoggingError;

/// Log severity, ordered from the catch-all threshold to the suppress-all threshold.
///
/// `All` and `Off` are sentinels: they are only meaningful as a logger's threshold and
/// are never the level of an emitted message.
///
/// # Examples
///
/// ```
/// use logbridge::Level;
///
/// assert!(Level::All < Level::Trace);
/// assert!(Level::Error > Level::Warn);
/// assert!(Level::Fatal < Level::Off);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Level {
    /// Threshold that enables every level
    #[default]
    All = 0,
    /// Most verbose diagnostic output
    Trace = 1,
    /// Information useful during development
    Debug = 2,
    /// Normal operational messages
    Info = 3,
    /// Potentially problematic situations
    Warn = 4,
    /// Failures of a single operation
    Error = 5,
    /// Failures the application cannot recover from
    Fatal = 6,
    /// Threshold that disables every level
    Off = 7,
}

impl Level {
    /// The six levels a message can be emitted at, least severe first.
    pub const MESSAGE_LEVELS: [Self; 6] = [
        Self::Trace,
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Fatal,
    ];

    /// Numeric rank backing the ordering.
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Upper-case name, as printed by the built-in sinks.
    ///
    /// ```
    /// use logbridge::Level;
    ///
    /// assert_eq!(Level::Warn.as_str(), "WARN");
    /// ```
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
            Self::Off => "OFF",
        }
    }

    /// Whether this is one of the two threshold-only sentinels.
    pub const fn is_sentinel(self) -> bool {
        matches!(self, Self::All | Self::Off)
    }

    /// Iterate over every non-sentinel level, least severe first.
    pub fn message_levels() -> impl Iterator<Item = Self> {
        Self::MESSAGE_LEVELS.into_iter()
    }

    /// Parse `value`, returning `default` when it is empty or unrecognized.
    ///
    /// Never fails: a malformed value is reported as a diagnostic trace and the default
    /// is used instead.
    pub fn parse_or(default: Self, value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => default,
            Some(text) => text.parse().unwrap_or_else(|err: LoggingError| {
                tracing::trace!(
                    target: "logbridge",
                    value = text,
                    default = %default,
                    error = %err,
                    "failed to parse level, using default"
                );
                default
            }),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            "fatal" => Ok(Self::Fatal),
            "off" => Ok(Self::Off),
            _ => Err(LoggingError::InvalidValue {
                value: s.to_string(),
                expected: "one of: all, trace, debug, info, warn, error, fatal, off",
            }),
        }
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
