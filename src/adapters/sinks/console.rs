//! Console sink: one line per entry on stdout or an injected writer.

use console::Style;
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

use crate::adapters::caching::{CachingLoggerFactory, CreateLogger};
use crate::domain::models::{Level, LogMessage, Properties};
use crate::domain::ports::{ErrorRef, Logger};

use super::simple::SimpleLoggerSettings;

/// Destination shared by every logger of one console factory.
pub type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

/// Factory for [`ConsoleLogger`]s, caching one logger per key.
pub type ConsoleLoggerFactory = CachingLoggerFactory<ConsoleSink>;

fn level_style(level: Level) -> Option<Style> {
    match level {
        Level::Fatal => Some(Style::new().red().bold()),
        Level::Error => Some(Style::new().yellow()),
        Level::Warn => Some(Style::new().magenta()),
        Level::Info => Some(Style::new().white()),
        Level::Debug => Some(Style::new().dim()),
        Level::Trace => Some(Style::new().black().bright()),
        Level::All | Level::Off => None,
    }
}

/// Writes formatted entries to a console-like writer.
pub struct ConsoleLogger {
    name: String,
    settings: Arc<SimpleLoggerSettings>,
    use_color: bool,
    writer: SharedWriter,
}

impl ConsoleLogger {
    pub fn new(name: impl Into<String>, settings: Arc<SimpleLoggerSettings>, use_color: bool, writer: SharedWriter) -> Self {
        Self {
            name: name.into(),
            settings,
            use_color,
            writer,
        }
    }

    pub fn settings(&self) -> &SimpleLoggerSettings {
        &self.settings
    }
}

impl Logger for ConsoleLogger {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_enabled(&self, level: Level) -> bool {
        self.settings.is_level_enabled(level)
    }

    fn write(&self, level: Level, message: &LogMessage<'_>, error: Option<ErrorRef<'_>>) {
        let mut line = String::new();
        self.settings.format_output(&mut line, &self.name, level, message, error);

        let mut writer = self.writer.lock();
        let result = match level_style(level).filter(|_| self.use_color) {
            Some(style) => writeln!(writer, "{}", style.apply_to(&line)),
            None => writeln!(writer, "{line}"),
        };
        // A broken console must not take the application down.
        if let Err(err) = result.and_then(|()| writer.flush()) {
            tracing::debug!(target: "logbridge", logger = %self.name, error = %err, "console write failed");
        }
    }
}

/// Construction hook behind [`ConsoleLoggerFactory`].
///
/// Extra property beyond the simple-logger ones: `useColor` (default `false`).
pub struct ConsoleSink {
    settings: Arc<SimpleLoggerSettings>,
    use_color: bool,
    writer: SharedWriter,
}

impl ConsoleSink {
    pub fn new(settings: SimpleLoggerSettings) -> Self {
        Self {
            settings: Arc::new(settings),
            use_color: false,
            writer: Arc::new(Mutex::new(Box::new(io::stdout()))),
        }
    }

    pub fn from_properties(properties: &Properties) -> Self {
        let mut sink = Self::new(SimpleLoggerSettings::from_properties(properties));
        sink.use_color = properties.flag_or("useColor", false);
        sink
    }

    #[must_use]
    pub fn with_writer(mut self, writer: impl Write + Send + 'static) -> Self {
        self.writer = Arc::new(Mutex::new(Box::new(writer)));
        self
    }

    #[must_use]
    pub fn with_shared_writer(mut self, writer: SharedWriter) -> Self {
        self.writer = writer;
        self
    }

    #[must_use]
    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    pub fn settings(&self) -> &SimpleLoggerSettings {
        &self.settings
    }
}

impl CreateLogger for ConsoleSink {
    fn create_logger(&self, name: &str) -> Option<Arc<dyn Logger>> {
        Some(Arc::new(ConsoleLogger::new(
            name,
            Arc::clone(&self.settings),
            self.use_color,
            Arc::clone(&self.writer),
        )))
    }

    fn factory_name(&self) -> &str {
        "ConsoleLoggerFactory"
    }
}

impl CachingLoggerFactory<ConsoleSink> {
    /// Console factory configured from adapter properties, writing to stdout.
    pub fn from_properties(properties: &Properties) -> Self {
        Self::case_sensitive(ConsoleSink::from_properties(properties))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{LoggerExt, LoggerFactory};

    /// In-memory writer whose contents stay readable after being boxed.
    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Buffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    fn factory(properties: &Properties, buffer: &Buffer) -> ConsoleLoggerFactory {
        ConsoleLoggerFactory::case_sensitive(ConsoleSink::from_properties(properties).with_writer(buffer.clone()))
    }

    #[test]
    fn test_threshold_filters_lines() {
        let buffer = Buffer::default();
        let props = Properties::new().with("level", "Warn").with("showDateTime", "false");
        let logger = factory(&props, &buffer).get_logger("app").unwrap();

        logger.info("x");
        assert_eq!(buffer.contents(), "");

        logger.warn("y");
        assert_eq!(buffer.contents(), "[WARN]  app - y\n");
    }

    #[test]
    fn test_loggers_share_writer() {
        let buffer = Buffer::default();
        let props = Properties::new()
            .with("showDateTime", "false")
            .with("showLevel", "false");
        let factory = factory(&props, &buffer);

        factory.get_logger("a").unwrap().info("first");
        factory.get_logger("b").unwrap().error_format("second {0}", &[2.into()]);

        assert_eq!(buffer.contents(), "a - first\nb - second 2\n");
    }

    #[test]
    fn test_factories_share_one_destination() {
        let buffer = Buffer::default();
        let shared: SharedWriter = Arc::new(Mutex::new(Box::new(buffer.clone())));
        let quiet = Properties::new().with("level", "Error").with("showDateTime", "false");
        let verbose = Properties::new().with("showDateTime", "false").with("showLevel", "false");
        let errors = ConsoleLoggerFactory::case_sensitive(ConsoleSink::from_properties(&quiet).with_shared_writer(Arc::clone(&shared)));
        let everything = ConsoleLoggerFactory::case_sensitive(ConsoleSink::from_properties(&verbose).with_shared_writer(shared));

        errors.get_logger("db").unwrap().info("hidden");
        errors.get_logger("db").unwrap().error("down");
        everything.get_logger("web").unwrap().debug("request");

        assert_eq!(buffer.contents(), "[ERROR] db - down\nweb - request\n");
    }

    #[test]
    fn test_from_properties_reads_color_flag() {
        let sink = ConsoleSink::from_properties(&Properties::new().with("useColor", "true"));
        assert!(sink.use_color);
        assert_eq!(sink.settings().level, Level::All);
    }

    #[test]
    fn test_every_message_level_has_a_style() {
        for level in Level::message_levels() {
            assert!(level_style(level).is_some());
        }
        assert!(level_style(Level::Off).is_none());
    }
}
