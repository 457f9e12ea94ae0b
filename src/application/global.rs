//! Process-wide [`LogManager`] and free-function shortcuts to it.
//!
//! The global manager is created on first use with the default file and environment
//! configuration source. Libraries should prefer receiving a `LogManager` or a
//! `LoggerFactory` explicitly; these shortcuts exist for application entry points.

use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::domain::errors::LoggingResult;
use crate::domain::models::LogConfiguration;
use crate::domain::ports::{ConfigSource, Logger, LoggerFactory};

use super::log_manager::LogManager;

static GLOBAL: Lazy<LogManager> = Lazy::new(LogManager::new);

/// The process-wide log manager.
pub fn global() -> &'static LogManager {
    &GLOBAL
}

pub fn get_logger(key: &str) -> LoggingResult<Arc<dyn Logger>> {
    GLOBAL.get_logger(key)
}

pub fn get_logger_for<T: ?Sized>() -> LoggingResult<Arc<dyn Logger>> {
    GLOBAL.get_logger_for::<T>()
}

pub fn set_adapter(factory: Arc<dyn LoggerFactory>) {
    GLOBAL.set_adapter(factory);
}

pub fn configure(configuration: LogConfiguration) -> LoggingResult<()> {
    GLOBAL.configure(configuration)
}

pub fn reset() {
    GLOBAL.reset();
}

pub fn reset_with(source: impl ConfigSource + 'static) {
    GLOBAL.reset_with(source);
}
