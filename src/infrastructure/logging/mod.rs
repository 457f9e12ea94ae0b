//! Diagnostic logging infrastructure
//!
//! The crate reports its own behavior (fallbacks, rejected values, adapter resolution)
//! through `tracing` under the `logbridge` target. This module wires a
//! `tracing-subscriber` for binaries that want to see it:
//! - JSON or pretty formatting
//! - `EnvFilter` with a configurable default directive

pub mod config;
pub mod logger;

pub use config::{DiagnosticsConfig, DiagnosticsFormat};
pub use logger::init_diagnostics;
