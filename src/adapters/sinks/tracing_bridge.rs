//! Bridge sink forwarding entries to the `tracing` ecosystem.
//!
//! Every entry becomes a `tracing` event under the [`BRIDGE_TARGET`] target with a
//! `logger` field holding the logger key and, when present, an `error` field holding the
//! rendered error chain. `Fatal` has no `tracing` counterpart and maps to `ERROR` with
//! `fatal = true`.

use std::sync::Arc;

use crate::adapters::caching::{CachingLoggerFactory, CreateLogger};
use crate::domain::models::{Level, LogMessage, Properties};
use crate::domain::ports::{ErrorRef, Logger};

use super::simple::format_error_chain;

/// Target every bridged event is emitted under.
pub const BRIDGE_TARGET: &str = "logbridge::events";

/// Factory for [`TracingLogger`]s, caching one logger per key.
pub type TracingLoggerFactory = CachingLoggerFactory<TracingSink>;

macro_rules! bridged {
    ($level:expr, enabled) => {
        match $level {
            Level::Trace => tracing::enabled!(target: BRIDGE_TARGET, tracing::Level::TRACE),
            Level::Debug => tracing::enabled!(target: BRIDGE_TARGET, tracing::Level::DEBUG),
            Level::Info => tracing::enabled!(target: BRIDGE_TARGET, tracing::Level::INFO),
            Level::Warn => tracing::enabled!(target: BRIDGE_TARGET, tracing::Level::WARN),
            Level::Error | Level::Fatal => tracing::enabled!(target: BRIDGE_TARGET, tracing::Level::ERROR),
            Level::All | Level::Off => false,
        }
    };
    ($level:expr, $($fields:tt)*) => {
        match $level {
            Level::Trace => tracing::event!(target: BRIDGE_TARGET, tracing::Level::TRACE, $($fields)*),
            Level::Debug => tracing::event!(target: BRIDGE_TARGET, tracing::Level::DEBUG, $($fields)*),
            Level::Info => tracing::event!(target: BRIDGE_TARGET, tracing::Level::INFO, $($fields)*),
            Level::Warn => tracing::event!(target: BRIDGE_TARGET, tracing::Level::WARN, $($fields)*),
            Level::Error => tracing::event!(target: BRIDGE_TARGET, tracing::Level::ERROR, $($fields)*),
            Level::Fatal => tracing::event!(target: BRIDGE_TARGET, tracing::Level::ERROR, fatal = true, $($fields)*),
            Level::All | Level::Off => {}
        }
    };
}

/// Logger whose entries are `tracing` events.
///
/// The level gate is the intersection of the configured threshold and whatever the
/// active `tracing` subscriber accepts.
pub struct TracingLogger {
    name: String,
    threshold: Level,
}

impl TracingLogger {
    pub fn new(name: impl Into<String>, threshold: Level) -> Self {
        Self {
            name: name.into(),
            threshold,
        }
    }
}

impl Logger for TracingLogger {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_enabled(&self, level: Level) -> bool {
        level >= self.threshold && bridged!(level, enabled)
    }

    fn write(&self, level: Level, message: &LogMessage<'_>, error: Option<ErrorRef<'_>>) {
        // The subscriber may have changed since the caller's gate check.
        if !bridged!(level, enabled) {
            return;
        }

        let text = message.render();
        match error {
            Some(error) => {
                let chain = format_error_chain(error);
                bridged!(level, logger = %self.name, error = %chain, "{}", text);
            }
            None => bridged!(level, logger = %self.name, "{}", text),
        }
    }
}

/// Construction hook behind [`TracingLoggerFactory`].
///
/// Reads the `level` property as the threshold applied on top of the subscriber's filter.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink {
    threshold: Level,
}

impl TracingSink {
    pub const fn new(threshold: Level) -> Self {
        Self { threshold }
    }

    pub fn from_properties(properties: &Properties) -> Self {
        Self::new(Level::parse_or(Level::All, properties.get("level")))
    }

    pub const fn threshold(&self) -> Level {
        self.threshold
    }
}

impl CreateLogger for TracingSink {
    fn create_logger(&self, name: &str) -> Option<Arc<dyn Logger>> {
        Some(Arc::new(TracingLogger::new(name, self.threshold)))
    }

    fn factory_name(&self) -> &str {
        "TracingLoggerFactory"
    }
}

impl CachingLoggerFactory<TracingSink> {
    pub fn from_properties(properties: &Properties) -> Self {
        Self::case_sensitive(TracingSink::from_properties(properties))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{LoggerExt, LoggerFactory};
    use parking_lot::Mutex;
    use std::io;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    impl Captured {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    fn subscriber(max: tracing::Level, out: &Captured) -> impl tracing::Subscriber + Send + Sync {
        tracing_subscriber::fmt()
            .with_max_level(max)
            .with_writer(out.clone())
            .with_ansi(false)
            .without_time()
            .finish()
    }

    #[test]
    fn test_gate_follows_subscriber() {
        let out = Captured::default();
        tracing::subscriber::with_default(subscriber(tracing::Level::WARN, &out), || {
            let logger = TracingLoggerFactory::case_sensitive(TracingSink::default())
                .get_logger("bridge")
                .unwrap();

            assert!(!logger.is_info_enabled());
            assert!(logger.is_warn_enabled());
            assert!(logger.is_fatal_enabled());
        });
    }

    #[test]
    fn test_threshold_narrows_subscriber() {
        let out = Captured::default();
        tracing::subscriber::with_default(subscriber(tracing::Level::TRACE, &out), || {
            let logger = TracingLogger::new("bridge", Level::Error);
            assert!(!logger.is_warn_enabled());
            assert!(logger.is_error_enabled());
        });
    }

    #[test]
    fn test_entries_become_events() {
        let out = Captured::default();
        tracing::subscriber::with_default(subscriber(tracing::Level::TRACE, &out), || {
            let logger = TracingLogger::new("orders", Level::All);
            logger.info_format("placed {0}", &[42.into()]);
            logger.fatal("halt");
        });

        let text = out.contents();
        assert!(text.contains("INFO"));
        assert!(text.contains("placed 42"));
        assert!(text.contains("logger=orders"));
        assert!(text.contains("fatal=true"));
        assert!(text.contains("halt"));
    }

    #[test]
    fn test_from_properties_reads_threshold() {
        let sink = TracingSink::from_properties(&Properties::new().with("level", "debug"));
        assert_eq!(sink.threshold(), Level::Debug);
    }
}
