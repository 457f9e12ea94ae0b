//! `tracing` layer routing events from the `tracing` ecosystem into the facade.
//!
//! Each event is written to the logger named by the layer's logger name format,
//! `{listenerName}.{sourceName}` unless configured otherwise, where `{listenerName}` is
//! the layer name and `{sourceName}` the event target. Levels map one to one; an `ERROR`
//! event carrying `fatal = true` becomes [`Level::Fatal`].
//!
//! Events under the crate's own `logbridge` targets are ignored, and so is anything
//! emitted while an event is being forwarded on the same thread.

use std::cell::Cell;
use std::fmt::{self, Write as _};
use std::sync::Arc;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

use crate::application::{global, LogManager};
use crate::domain::models::{Level, Properties};
use crate::domain::ports::LoggerExt;

pub const DEFAULT_LISTENER_NAME: &str = "Diagnostics";

pub const DEFAULT_LOGGER_NAME_FORMAT: &str = "{listenerName}.{sourceName}";

thread_local! {
    static FORWARDING: Cell<bool> = const { Cell::new(false) };
}

/// Marks the current thread as forwarding until dropped.
struct ForwardingGuard;

impl ForwardingGuard {
    fn enter() -> Option<Self> {
        FORWARDING.with(|active| (!active.replace(true)).then_some(Self))
    }
}

impl Drop for ForwardingGuard {
    fn drop(&mut self) {
        FORWARDING.with(|active| active.set(false));
    }
}

enum ManagerHandle {
    Global,
    Shared(Arc<LogManager>),
}

/// Layer writing every `tracing` event to a facade logger.
///
/// # Examples
///
/// ```
/// use logbridge::{CapturingLoggerFactory, FnConfigSource, ForwardingLayer, LogManager};
/// use std::sync::Arc;
/// use tracing_subscriber::layer::SubscriberExt;
///
/// let manager = Arc::new(LogManager::with_source(FnConfigSource::new(|_| Ok(None))));
/// let capture = Arc::new(CapturingLoggerFactory::default());
/// manager.set_adapter(capture.clone());
///
/// let subscriber = tracing_subscriber::registry().with(ForwardingLayer::new().with_manager(manager));
/// tracing::subscriber::with_default(subscriber, || {
///     tracing::warn!(target: "billing", "invoice {} overdue", 17);
/// });
///
/// let event = capture.last_event().unwrap();
/// assert_eq!(event.logger, "Diagnostics.billing");
/// assert_eq!(event.message, "invoice 17 overdue");
/// ```
pub struct ForwardingLayer {
    manager: ManagerHandle,
    name: String,
    logger_name_format: String,
}

impl ForwardingLayer {
    /// Layer forwarding into the process-wide manager with default naming.
    pub fn new() -> Self {
        Self::from_properties(&Properties::new())
    }

    /// Reads `name` and `loggerNameFormat`.
    pub fn from_properties(properties: &Properties) -> Self {
        Self {
            manager: ManagerHandle::Global,
            name: properties.get_or("name", DEFAULT_LISTENER_NAME).to_string(),
            logger_name_format: properties
                .get_or("loggerNameFormat", DEFAULT_LOGGER_NAME_FORMAT)
                .to_string(),
        }
    }

    /// Forward into `manager` instead of the process-wide one.
    #[must_use]
    pub fn with_manager(mut self, manager: Arc<LogManager>) -> Self {
        self.manager = ManagerHandle::Shared(manager);
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_logger_name_format(mut self, format: impl Into<String>) -> Self {
        self.logger_name_format = format.into();
        self
    }

    /// Facade logger key for events under `target`.
    pub fn logger_name(&self, target: &str) -> String {
        self.logger_name_format
            .replace("{listenerName}", &self.name)
            .replace("{sourceName}", target)
    }

    fn manager(&self) -> &LogManager {
        match &self.manager {
            ManagerHandle::Global => global::global(),
            ManagerHandle::Shared(manager) => manager,
        }
    }
}

impl Default for ForwardingLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ForwardingLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForwardingLayer")
            .field("name", &self.name)
            .field("logger_name_format", &self.logger_name_format)
            .finish_non_exhaustive()
    }
}

fn is_internal(target: &str) -> bool {
    target == "logbridge" || target.starts_with("logbridge::")
}

fn map_level(level: tracing::Level, fatal: bool) -> Level {
    if level == tracing::Level::TRACE {
        Level::Trace
    } else if level == tracing::Level::DEBUG {
        Level::Debug
    } else if level == tracing::Level::INFO {
        Level::Info
    } else if level == tracing::Level::WARN {
        Level::Warn
    } else if fatal {
        Level::Fatal
    } else {
        Level::Error
    }
}

/// Event fields flattened to `message key=value ...`.
#[derive(Default)]
struct EventText {
    message: String,
    fields: String,
    fatal: bool,
}

impl EventText {
    fn into_message(self) -> String {
        if self.message.is_empty() {
            self.fields.trim_start().to_string()
        } else {
            self.message + &self.fields
        }
    }
}

impl Visit for EventText {
    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "fatal" {
            self.fatal = value;
        } else {
            self.record_debug(field, &value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={value}", field.name());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            let _ = write!(self.fields, " {}={value:?}", field.name());
        }
    }
}

impl<S: Subscriber> Layer<S> for ForwardingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if is_internal(metadata.target()) {
            return;
        }
        let Some(_guard) = ForwardingGuard::enter() else {
            return;
        };
        // Configuration errors surface on the application's own lookups.
        let Ok(logger) = self.manager().get_logger(&self.logger_name(metadata.target())) else {
            return;
        };

        let mut text = EventText::default();
        event.record(&mut text);
        let level = map_level(*metadata.level(), text.fatal);
        logger.log(level, text.into_message());
    }
}
