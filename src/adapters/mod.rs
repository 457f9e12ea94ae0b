//! Logger adapters and the registry that maps declarative names onto them.

pub mod caching;
pub mod forwarding_layer;
pub mod registry;
pub mod sinks;

pub use caching::{CachingLoggerFactory, CreateLogger, KeyComparison};
pub use forwarding_layer::ForwardingLayer;
pub use registry::{AdapterConstructor, AdapterRegistry};
