use std::any::type_name;
use std::sync::Arc;

use crate::domain::errors::LoggingResult;

use super::logger::Logger;

/// Port trait mapping a logger key to a logger instance.
///
/// Factories are the unit of configuration: switching sinks means installing a
/// different factory, never touching call sites.
pub trait LoggerFactory: Send + Sync {
    /// Logger for `key`. Implementations hand out the same instance for the same key.
    fn get_logger(&self, key: &str) -> LoggingResult<Arc<dyn Logger>>;
}

/// Type-keyed lookups, available on every [`LoggerFactory`] including trait objects.
pub trait LoggerFactoryExt: LoggerFactory {
    /// Logger keyed by the fully qualified name of `T`.
    ///
    /// ```
    /// use logbridge::{Logger, LoggerFactoryExt, NoOpLoggerFactory};
    ///
    /// struct Worker;
    /// let logger = NoOpLoggerFactory::new().get_logger_for::<Worker>().unwrap();
    /// assert!(!logger.is_info_enabled());
    /// ```
    fn get_logger_for<T: ?Sized>(&self) -> LoggingResult<Arc<dyn Logger>> {
        self.get_logger(type_name::<T>())
    }
}

impl<F: LoggerFactory + ?Sized> LoggerFactoryExt for F {}

impl<F: LoggerFactory + ?Sized> LoggerFactory for Arc<F> {
    fn get_logger(&self, key: &str) -> LoggingResult<Arc<dyn Logger>> {
        (**self).get_logger(key)
    }
}
