//! Domain layer for the logging facade
//!
//! Levels, messages and settings (`models`), the traits adapters implement (`ports`)
//! and the error taxonomy (`errors`).

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{LoggingError, LoggingResult, TemplateError};
