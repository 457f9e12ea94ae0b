//! Errors raised by the logging facade.

use thiserror::Error;

/// Boxed error carried as the cause of a configuration failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failures while parsing a composite message template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unclosed placeholder starting at offset {0}")]
    UnclosedPlaceholder(usize),

    #[error("unmatched '}}' at offset {0}")]
    UnmatchedBrace(usize),

    #[error("invalid placeholder '{0}'")]
    InvalidPlaceholder(String),

    #[error("placeholder index {index} out of range for {count} argument(s)")]
    IndexOutOfRange { index: usize, count: usize },
}

/// Errors that can occur while resolving adapters or obtaining loggers.
///
/// Configuration errors surface lazily: the first `get_logger` after a reset is the call
/// that observes them, not the call that installed the configuration.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("{factory} produced no logger for key '{key}'")]
    AdapterContractViolation { factory: String, key: String },

    #[error("invalid value '{value}': expected {expected}")]
    InvalidValue { value: String, expected: &'static str },

    #[error("invalid argument '{name}': {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    #[error("template error: {0}")]
    Template(#[from] TemplateError),
}

impl LoggingError {
    /// A configuration error without an underlying cause.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// A configuration error wrapping `source`.
    pub fn configuration_with(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}

pub type LoggingResult<T> = Result<T, LoggingError>;

/// Run `action`, wrapping any failure that is not already a configuration error as one
/// carrying `context`.
pub fn guard<T>(context: impl FnOnce() -> String, action: impl FnOnce() -> LoggingResult<T>) -> LoggingResult<T> {
    match action() {
        Ok(value) => Ok(value),
        Err(err @ LoggingError::Configuration { .. }) => Err(err),
        Err(err) => Err(LoggingError::configuration_with(context(), err)),
    }
}
