//! Settings and line layout shared by the built-in text sinks.
//!
//! Recognized properties (keys case-insensitive):
//! - `level`: threshold, default `All`
//! - `showLevel`, `showDateTime`, `showLogName`: default `true`
//! - `dateTimeFormat`: `strftime` pattern; empty means the default layout

use chrono::Local;
use std::error::Error;
use std::fmt::Write as _;

use crate::domain::models::{Level, LogMessage, Properties};

const DEFAULT_DATE_TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S:%3f";

/// Layout and threshold for loggers built by a simple sink factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleLoggerSettings {
    pub level: Level,
    pub show_level: bool,
    pub show_date_time: bool,
    pub show_log_name: bool,
    pub date_time_format: Option<String>,
}

impl Default for SimpleLoggerSettings {
    fn default() -> Self {
        Self {
            level: Level::All,
            show_level: true,
            show_date_time: true,
            show_log_name: true,
            date_time_format: None,
        }
    }
}

impl SimpleLoggerSettings {
    /// Read settings from adapter properties. Malformed values fall back to defaults.
    pub fn from_properties(properties: &Properties) -> Self {
        let defaults = Self::default();
        Self {
            level: Level::parse_or(defaults.level, properties.get("level")),
            show_level: properties.flag_or("showLevel", defaults.show_level),
            show_date_time: properties.flag_or("showDateTime", defaults.show_date_time),
            show_log_name: properties.flag_or("showLogName", defaults.show_log_name),
            date_time_format: properties
                .get("dateTimeFormat")
                .filter(|format| !format.trim().is_empty())
                .map(str::to_string),
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn without_date_time(mut self) -> Self {
        self.show_date_time = false;
        self
    }

    /// Threshold check: a level is enabled when it is at or above the configured one.
    pub fn is_level_enabled(&self, level: Level) -> bool {
        level >= self.level
    }

    /// Lay out one entry: `[date ][LEVEL]   name - message`, then the error chain.
    pub fn format_output(&self, out: &mut String, name: &str, level: Level, message: &LogMessage<'_>, error: Option<&(dyn Error + 'static)>) {
        if self.show_date_time {
            let format = self.date_time_format.as_deref().unwrap_or(DEFAULT_DATE_TIME_FORMAT);
            let _ = write!(out, "{} ", Local::now().format(format));
        }

        if self.show_level {
            let _ = write!(out, "{:<8}", format!("[{}]", level.as_str()));
        }

        if self.show_log_name {
            out.push_str(name);
            out.push_str(" - ");
        }

        out.push_str(&message.render());

        if let Some(error) = error {
            out.push('\n');
            out.push_str(&format_error_chain(error));
        }
    }
}

/// Render an error followed by its `source()` chain, one cause per line.
pub fn format_error_chain(error: &(dyn Error + 'static)) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let _ = write!(text, "\nCaused by: {cause}");
        source = cause.source();
    }
    text
}
