//! Infrastructure layer: configuration sources and diagnostic output.

pub mod config;
pub mod logging;
