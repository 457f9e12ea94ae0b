//! logbridge - a logging facade with pluggable adapters
//!
//! Application and library code logs against the [`Logger`] trait; which sink receives
//! the entries (console, `tracing`, in-memory capture, nothing) is decided when the
//! [`LogManager`] builds its factory from configuration.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): levels, deferred messages, templates and the port traits
//! - **Adapters** (`adapters`): the caching factory base, built-in sinks and the adapter registry
//! - **Application Layer** (`application`): the log manager and its process-wide instance
//! - **Infrastructure Layer** (`infrastructure`): configuration sources and diagnostics
//! - **CLI Layer** (`cli`): the `logbridge` binary
//!
//! # Example
//!
//! ```
//! use logbridge::{CapturingLoggerFactory, LogManager, LoggerExt, FnConfigSource};
//! use std::sync::Arc;
//!
//! let manager = LogManager::with_source(FnConfigSource::new(|_| Ok(None)));
//! let capture = Arc::new(CapturingLoggerFactory::default());
//! manager.set_adapter(capture.clone());
//!
//! let logger = manager.get_logger("checkout").unwrap();
//! logger.info_format("order {0} placed", &[1042.into()]);
//! logger.debug_with(|fmt| fmt.format("cart: {0} items", &[3.into()]));
//!
//! assert_eq!(capture.events()[0].message, "order 1042 placed");
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use adapters::sinks::{
    format_error_chain, CapturedEvent, CapturingLogger, CapturingLoggerFactory, ConsoleLogger,
    ConsoleLoggerFactory, ConsoleSink, NoOpLogger, NoOpLoggerFactory, SimpleLoggerSettings,
    TracingLogger, TracingLoggerFactory, TracingSink,
};
pub use adapters::{
    AdapterConstructor, AdapterRegistry, CachingLoggerFactory, CreateLogger, ForwardingLayer, KeyComparison,
};
pub use application::global;
pub use application::LogManager;
pub use domain::models::{
    coalesce, format_template, Arg, CallbackMessage, Culture, FactoryAdapterConfiguration, Level,
    LogConfiguration, LogMessage, LogSetting, MessageCallback, MessageFormatter, Properties,
    TemplateMessage,
};
pub use domain::ports::{
    ConfigSource, ErrorRef, FnConfigSource, Logger, LoggerExt, LoggerFactory, LoggerFactoryExt,
    Section, LOGGING_SECTION,
};
pub use domain::{LoggingError, LoggingResult, TemplateError};
pub use infrastructure::config::{
    parse_section, parse_section_str, FileConfigSource, LogConfigurationSource, SectionDocument,
};
pub use infrastructure::logging::{init_diagnostics, DiagnosticsConfig, DiagnosticsFormat};
