//! Built-in logger adapters

pub mod capturing;
pub mod console;
pub mod noop;
pub mod simple;
pub mod tracing_bridge;

pub use capturing::{CapturedEvent, CapturingLogger, CapturingLoggerFactory};
pub use console::{ConsoleLogger, ConsoleLoggerFactory, ConsoleSink, SharedWriter};
pub use noop::{NoOpLogger, NoOpLoggerFactory};
pub use simple::{format_error_chain, SimpleLoggerSettings};
pub use tracing_bridge::{TracingLogger, TracingLoggerFactory, TracingSink, BRIDGE_TARGET};
