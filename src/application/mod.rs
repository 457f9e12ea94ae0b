//! Application layer: the log manager and its process-wide instance.

pub mod global;
pub mod log_manager;

pub use log_manager::{construct, LogManager};
