//! Configuration source backed by an in-memory [`LogConfiguration`].

use crate::domain::errors::{LoggingError, LoggingResult};
use crate::domain::models::{LogConfiguration, LogSetting};
use crate::domain::ports::{ConfigSource, Section, LOGGING_SECTION};

/// Serves one declarative adapter configuration as the `logging` section.
#[derive(Debug, Clone)]
pub struct LogConfigurationSource {
    configuration: LogConfiguration,
}

impl LogConfigurationSource {
    pub const fn new(configuration: LogConfiguration) -> Self {
        Self { configuration }
    }

    pub const fn configuration(&self) -> &LogConfiguration {
        &self.configuration
    }
}

impl ConfigSource for LogConfigurationSource {
    fn section(&self, name: &str) -> LoggingResult<Option<Section>> {
        if name.trim().is_empty() {
            return Err(LoggingError::InvalidArgument {
                name: "section",
                reason: "section name must not be empty".to_string(),
            });
        }
        if !name.eq_ignore_ascii_case(LOGGING_SECTION) {
            return Ok(None);
        }

        let adapter = &self.configuration.factory_adapter;
        Ok(Some(Section::Settings(LogSetting::new(
            adapter.adapter_type.trim(),
            adapter.arguments.clone(),
        ))))
    }

    fn describe(&self) -> String {
        format!("in-memory configuration ({})", self.configuration.factory_adapter.adapter_type)
    }
}
