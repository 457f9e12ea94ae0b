//! Silent logger: every predicate is false and every write is discarded.

use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::domain::errors::LoggingResult;
use crate::domain::models::{Level, LogMessage};
use crate::domain::ports::{ErrorRef, Logger, LoggerFactory};

static SHARED: Lazy<Arc<NoOpLogger>> = Lazy::new(|| Arc::new(NoOpLogger::new()));

/// Logger that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpLogger;

impl NoOpLogger {
    pub const fn new() -> Self {
        Self
    }
}

impl Logger for NoOpLogger {
    fn name(&self) -> &str {
        "noop"
    }

    fn is_enabled(&self, _level: Level) -> bool {
        false
    }

    fn write(&self, _level: Level, _message: &LogMessage<'_>, _error: Option<ErrorRef<'_>>) {}
}

/// Factory handing out one process-wide [`NoOpLogger`] for every key.
///
/// This is what the log manager falls back to when no configuration is found.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpLoggerFactory;

impl NoOpLoggerFactory {
    pub const fn new() -> Self {
        Self
    }
}

impl LoggerFactory for NoOpLoggerFactory {
    fn get_logger(&self, _key: &str) -> LoggingResult<Arc<dyn Logger>> {
        let logger: Arc<dyn Logger> = SHARED.clone();
        Ok(logger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::LoggerExt;

    #[test]
    fn test_every_predicate_is_false() {
        let logger = NoOpLoggerFactory::new().get_logger("any").unwrap();
        for level in Level::message_levels() {
            assert!(!logger.is_enabled(level));
        }
        assert!(!logger.is_fatal_enabled());
    }

    #[test]
    fn test_writes_are_silent() {
        let logger = NoOpLoggerFactory::new().get_logger("any").unwrap();
        logger.fatal_with(|_| panic!("callback must not run"));
        logger.error("discarded");
    }

    #[test]
    fn test_all_keys_share_one_logger() {
        let factory = NoOpLoggerFactory::new();
        let a = factory.get_logger("a").unwrap();
        let b = NoOpLoggerFactory::new().get_logger("b").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
