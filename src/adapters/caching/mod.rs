pub mod caching_factory;

pub use caching_factory::{CachingLoggerFactory, CreateLogger, KeyComparison};
