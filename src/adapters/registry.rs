//! Adapter registry: resolves declarative adapter type names to factory constructors.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::domain::models::Properties;
use crate::domain::ports::LoggerFactory;

use super::sinks::{CapturingLoggerFactory, ConsoleLoggerFactory, NoOpLoggerFactory, TracingLoggerFactory};

/// Builds a factory from the properties of a declarative setting.
pub type AdapterConstructor = Arc<dyn Fn(&Properties) -> anyhow::Result<Arc<dyn LoggerFactory>> + Send + Sync>;

/// Registry of available logger adapters, keyed by case-insensitive name.
#[derive(Clone)]
pub struct AdapterRegistry {
    constructors: BTreeMap<String, AdapterConstructor>,
}

impl AdapterRegistry {
    /// Registry with no adapters at all.
    pub fn empty() -> Self {
        Self {
            constructors: BTreeMap::new(),
        }
    }

    /// Registry holding the built-in sinks under their canonical names and short aliases.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register_all(&["ConsoleLoggerFactory", "console"], |props| {
            Ok(Arc::new(ConsoleLoggerFactory::from_properties(props)))
        });
        registry.register_all(&["TracingLoggerFactory", "trace", "tracing"], |props| {
            Ok(Arc::new(TracingLoggerFactory::from_properties(props)))
        });
        registry.register_all(&["NoOpLoggerFactory", "noop"], |_| Ok(Arc::new(NoOpLoggerFactory::new())));
        registry.register_all(&["CapturingLoggerFactory", "capturing"], |props| {
            Ok(Arc::new(CapturingLoggerFactory::from_properties(props)))
        });
        registry
    }

    /// Register (or replace) the constructor for `name`.
    pub fn register<F>(&mut self, name: &str, constructor: F)
    where
        F: Fn(&Properties) -> anyhow::Result<Arc<dyn LoggerFactory>> + Send + Sync + 'static,
    {
        self.constructors.insert(name.to_lowercase(), Arc::new(constructor));
    }

    fn register_all<F>(&mut self, names: &[&str], constructor: F)
    where
        F: Fn(&Properties) -> anyhow::Result<Arc<dyn LoggerFactory>> + Send + Sync + 'static,
    {
        let constructor: AdapterConstructor = Arc::new(constructor);
        for name in names {
            self.constructors.insert(name.to_lowercase(), Arc::clone(&constructor));
        }
    }

    /// Look up the constructor for `name`. `None` means the type is unknown.
    pub fn resolve(&self, name: &str) -> Option<AdapterConstructor> {
        self.constructors.get(&name.trim().to_lowercase()).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// Registered names, lowercased and sorted.
    pub fn names(&self) -> Vec<&str> {
        self.constructors.keys().map(String::as_str).collect()
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterRegistry").field("names", &self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Level;
    use crate::domain::ports::Logger;

    #[test]
    fn test_builtin_names_and_aliases() {
        let registry = AdapterRegistry::new();

        for name in ["console", "ConsoleLoggerFactory", "trace", "noop", "capturing", "CAPTURING"] {
            assert!(registry.contains(name), "missing {name}");
        }
        assert!(!registry.contains("syslog"));
    }

    #[test]
    fn test_resolve_builds_configured_factory() {
        let registry = AdapterRegistry::new();
        let constructor = registry.resolve("capturing").unwrap();

        let factory = constructor(&Properties::new().with("level", "warn")).unwrap();
        let logger = factory.get_logger("x").unwrap();

        assert!(!logger.is_enabled(Level::Info));
        assert!(logger.is_enabled(Level::Warn));
    }

    #[test]
    fn test_register_custom_adapter() {
        let mut registry = AdapterRegistry::empty();
        registry.register("Silent", |_| Ok(Arc::new(NoOpLoggerFactory::new())));

        assert_eq!(registry.names(), vec!["silent"]);
        assert!(registry.resolve(" silent ").is_some());
    }

    #[test]
    fn test_names_fold_non_ascii_case() {
        let mut registry = AdapterRegistry::empty();
        registry.register("Überwachung", |_| Ok(Arc::new(NoOpLoggerFactory::new())));

        assert!(registry.contains("ÜBERWACHUNG"));
        assert!(registry.contains("überwachung"));
        assert_eq!(registry.names(), vec!["überwachung"]);
    }

    #[test]
    fn test_constructor_errors_surface() {
        let mut registry = AdapterRegistry::empty();
        registry.register("broken", |_| anyhow::bail!("missing endpoint"));

        let constructor = registry.resolve("broken").unwrap();
        let err = constructor(&Properties::new()).err().unwrap();
        assert_eq!(err.to_string(), "missing endpoint");
    }
}
