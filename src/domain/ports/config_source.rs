use std::any::type_name;
use std::fmt;
use std::sync::Arc;

use crate::domain::errors::LoggingResult;
use crate::domain::models::LogSetting;

use super::logger_factory::LoggerFactory;

/// Name of the section the log manager asks its configuration source for.
pub const LOGGING_SECTION: &str = "logging";

/// What a configuration source can hand back for a section.
#[derive(Clone)]
pub enum Section {
    /// A ready-to-use factory; declarative settings are bypassed entirely.
    Factory(Arc<dyn LoggerFactory>),
    /// Adapter name plus constructor arguments.
    Settings(LogSetting),
}

impl fmt::Debug for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Factory(_) => f.write_str("Factory(..)"),
            Self::Settings(setting) => f.debug_tuple("Settings").field(setting).finish(),
        }
    }
}

/// Port trait for wherever logging configuration is stored.
///
/// Returning `Ok(None)` means "not configured"; the log manager then falls back to
/// no-op logging.
pub trait ConfigSource: Send + Sync {
    fn section(&self, name: &str) -> LoggingResult<Option<Section>>;

    /// Human-readable name used in diagnostics.
    fn describe(&self) -> String {
        type_name::<Self>().to_string()
    }
}

/// Adapts a closure into a [`ConfigSource`].
///
/// ```
/// use logbridge::{FnConfigSource, LogManager, Logger};
///
/// let manager = LogManager::with_source(FnConfigSource::new(|_| Ok(None)));
/// assert!(!manager.get_logger("app").unwrap().is_error_enabled());
/// ```
pub struct FnConfigSource<F>(F);

impl<F> FnConfigSource<F>
where
    F: Fn(&str) -> LoggingResult<Option<Section>> + Send + Sync,
{
    pub const fn new(source: F) -> Self {
        Self(source)
    }
}

impl<F> ConfigSource for FnConfigSource<F>
where
    F: Fn(&str) -> LoggingResult<Option<Section>> + Send + Sync,
{
    fn section(&self, name: &str) -> LoggingResult<Option<Section>> {
        (self.0)(name)
    }

    fn describe(&self) -> String {
        "closure configuration source".to_string()
    }
}
