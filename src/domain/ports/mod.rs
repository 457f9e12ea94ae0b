//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the interfaces adapters implement:
//! - Logger: level gate plus the single write primitive of a sink
//! - LoggerFactory: maps logger keys to logger instances
//! - ConfigSource: supplies the section that selects the active factory
//!
//! Application code depends on these traits only, never on a concrete sink.

pub mod config_source;
pub mod logger;
pub mod logger_factory;

pub use config_source::{ConfigSource, FnConfigSource, Section, LOGGING_SECTION};
pub use logger::{ErrorRef, Logger, LoggerExt};
pub use logger_factory::{LoggerFactory, LoggerFactoryExt};
