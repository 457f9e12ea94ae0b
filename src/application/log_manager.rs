//! The log manager: owns the active logger factory and rebuilds it from configuration.
//!
//! The factory is built lazily on the first logger request after construction or a
//! reset. Lookups take a read lock on the factory slot; building, swapping and resetting
//! serialize on a separate load lock, so a rebuild never blocks readers of an already
//! installed factory for longer than the final slot update.

use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

use crate::adapters::registry::AdapterRegistry;
use crate::adapters::sinks::NoOpLoggerFactory;
use crate::domain::errors::{guard, LoggingError, LoggingResult};
use crate::domain::models::{LogConfiguration, LogSetting, Properties};
use crate::domain::ports::{ConfigSource, Logger, LoggerFactory, Section, LOGGING_SECTION};
use crate::infrastructure::config::{FileConfigSource, LogConfigurationSource};

struct LoadState {
    source: Arc<dyn ConfigSource>,
    registry: AdapterRegistry,
}

/// Registry of the active [`LoggerFactory`].
///
/// # Examples
///
/// ```
/// use logbridge::{FnConfigSource, LogConfiguration, LogManager, Logger, LoggerExt, Properties};
///
/// let manager = LogManager::with_source(FnConfigSource::new(|_| Ok(None)));
/// assert!(!manager.get_logger("app").unwrap().is_info_enabled());
///
/// manager
///     .configure(LogConfiguration::adapter("capturing", Properties::new().with("level", "Info")))
///     .unwrap();
/// let logger = manager.get_logger("app").unwrap();
/// assert!(logger.is_info_enabled());
/// logger.info("configured");
/// ```
pub struct LogManager {
    load: Mutex<LoadState>,
    factory: RwLock<Option<Arc<dyn LoggerFactory>>>,
}

impl LogManager {
    /// Manager reading `logbridge.yaml` and `LOGBRIDGE_*` environment variables.
    pub fn new() -> Self {
        Self::from_parts(Arc::new(FileConfigSource::new()), AdapterRegistry::new())
    }

    /// Manager reading its configuration from `source`.
    pub fn with_source(source: impl ConfigSource + 'static) -> Self {
        Self::from_parts(Arc::new(source), AdapterRegistry::new())
    }

    pub fn from_parts(source: Arc<dyn ConfigSource>, registry: AdapterRegistry) -> Self {
        Self {
            load: Mutex::new(LoadState { source, registry }),
            factory: RwLock::new(None),
        }
    }

    /// Replace the adapter registry. The current factory stays installed.
    #[must_use]
    pub fn with_registry(self, registry: AdapterRegistry) -> Self {
        self.load.lock().registry = registry;
        self
    }

    /// Make `name` resolvable from declarative settings.
    pub fn register_adapter<F>(&self, name: &str, constructor: F)
    where
        F: Fn(&Properties) -> anyhow::Result<Arc<dyn LoggerFactory>> + Send + Sync + 'static,
    {
        self.load.lock().registry.register(name, constructor);
    }

    /// Active factory, building it from the configuration source if none is installed.
    ///
    /// A failed build is not cached: the next call tries again.
    pub fn adapter(&self) -> LoggingResult<Arc<dyn LoggerFactory>> {
        if let Some(factory) = self.factory.read().as_ref() {
            return Ok(Arc::clone(factory));
        }

        let load = self.load.lock();
        // Another thread may have built it while we waited for the load lock.
        if let Some(factory) = self.factory.read().as_ref() {
            return Ok(Arc::clone(factory));
        }

        let factory = build_factory(&load)?;
        *self.factory.write() = Some(Arc::clone(&factory));
        Ok(factory)
    }

    /// Install `factory` directly, bypassing the configuration source.
    pub fn set_adapter(&self, factory: Arc<dyn LoggerFactory>) {
        let _load = self.load.lock();
        *self.factory.write() = Some(factory);
        tracing::debug!(target: "logbridge", "adapter replaced");
    }

    /// Discard the active factory and go back to the default file and environment source.
    ///
    /// Loggers handed out earlier keep working against the old factory's sinks.
    pub fn reset(&self) {
        self.reset_with(FileConfigSource::new());
    }

    /// Discard the active factory and read configuration from `source` from now on.
    pub fn reset_with(&self, source: impl ConfigSource + 'static) {
        self.reset_with_shared(Arc::new(source));
    }

    pub fn reset_with_shared(&self, source: Arc<dyn ConfigSource>) {
        let mut load = self.load.lock();
        tracing::debug!(target: "logbridge", source = %source.describe(), "configuration source replaced");
        load.source = source;
        *self.factory.write() = None;
    }

    /// Adopt an in-memory configuration.
    ///
    /// Fails without touching the current state when no adapter type is named. Errors
    /// resolving or constructing the adapter surface on the next logger request.
    pub fn configure(&self, configuration: LogConfiguration) -> LoggingResult<()> {
        if configuration.factory_adapter.adapter_type.trim().is_empty() {
            return Err(LoggingError::InvalidArgument {
                name: "adapter_type",
                reason: "a factory adapter type must be named".to_string(),
            });
        }
        self.reset_with(LogConfigurationSource::new(configuration));
        Ok(())
    }

    pub fn get_logger(&self, key: &str) -> LoggingResult<Arc<dyn Logger>> {
        self.adapter()?.get_logger(key)
    }

    /// Logger keyed by the fully qualified name of `T`.
    pub fn get_logger_for<T: ?Sized>(&self) -> LoggingResult<Arc<dyn Logger>> {
        self.get_logger(std::any::type_name::<T>())
    }

    /// Description of the current configuration source.
    pub fn source_description(&self) -> String {
        self.load.lock().source.describe()
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}

fn build_factory(load: &LoadState) -> LoggingResult<Arc<dyn LoggerFactory>> {
    let description = load.source.describe();
    let section = guard(
        || format!("failed to read section '{LOGGING_SECTION}' from {description}"),
        || load.source.section(LOGGING_SECTION),
    )?;

    match section {
        None => {
            tracing::trace!(target: "logbridge", source = %description, "no logging configuration, using no-op logging");
            Ok(Arc::new(NoOpLoggerFactory::new()))
        }
        Some(Section::Factory(factory)) => {
            tracing::debug!(target: "logbridge", source = %description, "using factory supplied by configuration source");
            Ok(factory)
        }
        Some(Section::Settings(setting)) => construct(&load.registry, &setting),
    }
}

/// Resolve and construct the adapter named by `setting`.
pub fn construct(registry: &AdapterRegistry, setting: &LogSetting) -> LoggingResult<Arc<dyn LoggerFactory>> {
    let adapter_type = setting.adapter_type.trim();
    let constructor = registry.resolve(adapter_type).ok_or_else(|| {
        LoggingError::configuration(format!(
            "adapter type '{adapter_type}' is not a registered logger factory (known: {})",
            registry.names().join(", ")
        ))
    })?;

    let factory = constructor(&setting.properties)
        .map_err(|err| LoggingError::configuration_with(format!("failed to construct adapter '{adapter_type}'"), err))?;

    tracing::debug!(target: "logbridge", adapter = adapter_type, "logger factory constructed");
    Ok(factory)
}
