//! In-memory sink recording every entry, for tests and diagnostics.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::adapters::caching::{CachingLoggerFactory, CreateLogger, KeyComparison};
use crate::domain::errors::LoggingResult;
use crate::domain::models::{Level, LogMessage, Properties};
use crate::domain::ports::{ErrorRef, Logger, LoggerFactory};

use super::simple::format_error_chain;

/// One recorded entry with its message already rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedEvent {
    pub logger: String,
    pub level: Level,
    pub message: String,
    pub error: Option<String>,
}

type EventLog = Arc<Mutex<Vec<CapturedEvent>>>;

pub struct CapturingLogger {
    name: String,
    threshold: Level,
    events: EventLog,
}

impl Logger for CapturingLogger {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_enabled(&self, level: Level) -> bool {
        level >= self.threshold
    }

    fn write(&self, level: Level, message: &LogMessage<'_>, error: Option<ErrorRef<'_>>) {
        let event = CapturedEvent {
            logger: self.name.clone(),
            level,
            message: message.render().into_owned(),
            error: error.map(format_error_chain),
        };
        self.events.lock().push(event);
    }
}

struct CapturingSink {
    threshold: Level,
    events: EventLog,
}

impl CreateLogger for CapturingSink {
    fn create_logger(&self, name: &str) -> Option<Arc<dyn Logger>> {
        Some(Arc::new(CapturingLogger {
            name: name.to_string(),
            threshold: self.threshold,
            events: Arc::clone(&self.events),
        }))
    }

    fn factory_name(&self) -> &str {
        "CapturingLoggerFactory"
    }
}

/// Factory whose loggers all append to one shared event list.
///
/// Keys are case-insensitive. The `level` property sets the threshold (default `All`).
///
/// # Examples
///
/// ```
/// use logbridge::{CapturingLoggerFactory, Level, LoggerExt, LoggerFactory};
///
/// let factory = CapturingLoggerFactory::new(Level::Info);
/// let logger = factory.get_logger("billing").unwrap();
/// logger.debug("dropped");
/// logger.info_format("charged {0}", &[12.into()]);
///
/// let event = factory.last_event().unwrap();
/// assert_eq!(event.message, "charged 12");
/// assert_eq!(factory.events().len(), 1);
/// ```
pub struct CapturingLoggerFactory {
    events: EventLog,
    inner: CachingLoggerFactory<CapturingSink>,
}

impl CapturingLoggerFactory {
    pub fn new(threshold: Level) -> Self {
        let events = EventLog::default();
        let sink = CapturingSink {
            threshold,
            events: Arc::clone(&events),
        };
        Self {
            events,
            inner: CachingLoggerFactory::new(sink, KeyComparison::CaseInsensitive),
        }
    }

    pub fn from_properties(properties: &Properties) -> Self {
        Self::new(Level::parse_or(Level::All, properties.get("level")))
    }

    /// Snapshot of every event recorded so far, oldest first.
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().clone()
    }

    pub fn last_event(&self) -> Option<CapturedEvent> {
        self.events.lock().last().cloned()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl Default for CapturingLoggerFactory {
    fn default() -> Self {
        Self::new(Level::All)
    }
}

impl LoggerFactory for CapturingLoggerFactory {
    fn get_logger(&self, key: &str) -> LoggingResult<Arc<dyn Logger>> {
        self.inner.get_logger(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Culture;
    use crate::domain::ports::LoggerExt;
    use std::fmt;

    #[derive(Debug)]
    struct Timeout;

    impl fmt::Display for Timeout {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("timed out")
        }
    }

    impl std::error::Error for Timeout {}

    #[test]
    fn test_records_rendered_events_in_order() {
        let factory = CapturingLoggerFactory::default();
        let a = factory.get_logger("a").unwrap();
        let b = factory.get_logger("b").unwrap();

        a.info("one");
        b.error_err("two", &Timeout);
        a.warn_format_in(&Culture::de_de(), "{0}", &[2.5.into()]);

        let events = factory.events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].logger, "a");
        assert_eq!(events[1].error.as_deref(), Some("timed out"));
        assert_eq!(events[2].message, "2,5");
    }

    #[test]
    fn test_threshold_from_properties() {
        let factory = CapturingLoggerFactory::from_properties(&Properties::new().with("level", "error"));
        let logger = factory.get_logger("svc").unwrap();

        logger.warn("skipped");
        logger.fatal("kept");

        assert_eq!(factory.events().len(), 1);
        assert_eq!(factory.last_event().map(|e| e.level), Some(Level::Fatal));
    }

    #[test]
    fn test_keys_ignore_case() {
        let factory = CapturingLoggerFactory::default();
        let upper = factory.get_logger("Svc").unwrap();
        let lower = factory.get_logger("svc").unwrap();
        assert!(Arc::ptr_eq(&upper, &lower));
    }

    #[test]
    fn test_clear_empties_the_log() {
        let factory = CapturingLoggerFactory::default();
        factory.get_logger("x").unwrap().info("entry");
        factory.clear();
        assert!(factory.events().is_empty());
        assert!(factory.last_event().is_none());
    }
}
