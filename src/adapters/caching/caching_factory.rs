//! Memoizing wrapper around logger construction.
//!
//! Wraps any [`CreateLogger`] implementation so that each key is constructed once and
//! the same `Arc` is handed out for every later lookup. Lookups take the read lock only;
//! construction happens under the write lock after a re-check, so concurrent first-time
//! lookups for one key construct exactly one logger.

use parking_lot::RwLock;
use std::any::type_name;
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::errors::{LoggingError, LoggingResult};
use crate::domain::ports::{Logger, LoggerFactory};

/// Construction hook for [`CachingLoggerFactory`].
///
/// Returning `None` is a contract violation reported as
/// [`LoggingError::AdapterContractViolation`].
pub trait CreateLogger: Send + Sync {
    fn create_logger(&self, name: &str) -> Option<Arc<dyn Logger>>;

    /// Name reported when the hook violates its contract.
    fn factory_name(&self) -> &str {
        type_name::<Self>()
    }
}

/// Whether logger keys compare exactly or ignoring ASCII case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyComparison {
    #[default]
    CaseSensitive,
    CaseInsensitive,
}

/// A [`LoggerFactory`] that caches the loggers produced by its [`CreateLogger`] hook.
///
/// # Examples
///
/// ```
/// use logbridge::{CachingLoggerFactory, CreateLogger, KeyComparison, Logger, LoggerFactory, NoOpLogger};
/// use std::sync::Arc;
///
/// struct Hook;
///
/// impl CreateLogger for Hook {
///     fn create_logger(&self, _name: &str) -> Option<Arc<dyn Logger>> {
///         Some(Arc::new(NoOpLogger::new()))
///     }
/// }
///
/// let factory = CachingLoggerFactory::new(Hook, KeyComparison::CaseInsensitive);
/// let a = factory.get_logger("App").unwrap();
/// let b = factory.get_logger("app").unwrap();
/// assert!(Arc::ptr_eq(&a, &b));
/// ```
pub struct CachingLoggerFactory<C> {
    creator: C,
    comparison: KeyComparison,
    cache: RwLock<HashMap<String, Arc<dyn Logger>>>,
}

impl<C: CreateLogger> CachingLoggerFactory<C> {
    pub fn new(creator: C, comparison: KeyComparison) -> Self {
        Self {
            creator,
            comparison,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Case-sensitive cache, the default for custom adapters.
    pub fn case_sensitive(creator: C) -> Self {
        Self::new(creator, KeyComparison::CaseSensitive)
    }

    pub fn case_insensitive(creator: C) -> Self {
        Self::new(creator, KeyComparison::CaseInsensitive)
    }

    pub const fn creator(&self) -> &C {
        &self.creator
    }

    pub const fn key_comparison(&self) -> KeyComparison {
        self.comparison
    }

    /// Number of cached loggers.
    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }

    /// Drop every cached logger. Loggers already handed out keep working.
    pub fn clear_cache(&self) {
        self.cache.write().clear();
    }

    fn cache_key<'k>(&self, key: &'k str) -> Cow<'k, str> {
        match self.comparison {
            KeyComparison::CaseSensitive => Cow::Borrowed(key),
            KeyComparison::CaseInsensitive => Cow::Owned(key.to_lowercase()),
        }
    }
}

impl<C: CreateLogger> LoggerFactory for CachingLoggerFactory<C> {
    fn get_logger(&self, key: &str) -> LoggingResult<Arc<dyn Logger>> {
        let cache_key = self.cache_key(key);

        if let Some(logger) = self.cache.read().get(cache_key.as_ref()) {
            return Ok(Arc::clone(logger));
        }

        let mut cache = self.cache.write();
        // Another thread may have created it while we waited for the write lock.
        if let Some(logger) = cache.get(cache_key.as_ref()) {
            return Ok(Arc::clone(logger));
        }

        let logger = self
            .creator
            .create_logger(key)
            .ok_or_else(|| LoggingError::AdapterContractViolation {
                factory: self.creator.factory_name().to_string(),
                key: key.to_string(),
            })?;

        tracing::trace!(target: "logbridge", key, factory = self.creator.factory_name(), "created logger");
        cache.insert(cache_key.into_owned(), Arc::clone(&logger));
        Ok(logger)
    }
}

impl<C: CreateLogger> CreateLogger for Arc<C> {
    fn create_logger(&self, name: &str) -> Option<Arc<dyn Logger>> {
        (**self).create_logger(name)
    }

    fn factory_name(&self) -> &str {
        (**self).factory_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sinks::NoOpLogger;
    use crate::domain::ports::LoggerFactoryExt;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingHook {
        created: AtomicUsize,
    }

    impl CreateLogger for CountingHook {
        fn create_logger(&self, _name: &str) -> Option<Arc<dyn Logger>> {
            self.created.fetch_add(1, Ordering::SeqCst);
            Some(Arc::new(NoOpLogger::new()))
        }
    }

    struct NullHook;

    impl CreateLogger for NullHook {
        fn create_logger(&self, _name: &str) -> Option<Arc<dyn Logger>> {
            None
        }

        fn factory_name(&self) -> &str {
            "NullHook"
        }
    }

    #[test]
    fn test_same_key_same_instance() {
        let factory = CachingLoggerFactory::case_sensitive(CountingHook::default());

        let first = factory.get_logger("X").unwrap();
        let second = factory.get_logger("X").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(factory.creator().created.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_case_sensitive_keys_are_distinct() {
        let factory = CachingLoggerFactory::case_sensitive(CountingHook::default());

        let upper = factory.get_logger("X").unwrap();
        let lower = factory.get_logger("x").unwrap();

        assert!(!Arc::ptr_eq(&upper, &lower));
        assert_eq!(factory.len(), 2);
    }

    #[test]
    fn test_case_insensitive_keys_share_instance() {
        let factory = CachingLoggerFactory::case_insensitive(CountingHook::default());

        let upper = factory.get_logger("X").unwrap();
        let lower = factory.get_logger("x").unwrap();

        assert!(Arc::ptr_eq(&upper, &lower));
        assert_eq!(factory.creator().created.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_case_insensitive_folds_non_ascii_keys() {
        let factory = CachingLoggerFactory::case_insensitive(CountingHook::default());

        let upper = factory.get_logger("Ärger").unwrap();
        let lower = factory.get_logger("ärger").unwrap();
        let greek = factory.get_logger("ΣΟΦΙΑ").unwrap();

        assert!(Arc::ptr_eq(&upper, &lower));
        assert!(Arc::ptr_eq(&greek, &factory.get_logger("σοφια").unwrap()));
        assert_eq!(factory.len(), 2);
    }

    #[test]
    fn test_type_lookup_uses_type_name_key() {
        let factory = CachingLoggerFactory::case_sensitive(CountingHook::default());

        let by_type = factory.get_logger_for::<CountingHook>().unwrap();
        let by_name = factory.get_logger(type_name::<CountingHook>()).unwrap();

        assert!(Arc::ptr_eq(&by_type, &by_name));
    }

    #[test]
    fn test_missing_logger_is_contract_violation() {
        let factory = CachingLoggerFactory::case_sensitive(NullHook);

        let err = factory.get_logger("db").err().unwrap();
        match err {
            LoggingError::AdapterContractViolation { factory, key } => {
                assert_eq!(factory, "NullHook");
                assert_eq!(key, "db");
            }
            other => panic!("expected contract violation, got {other:?}"),
        }
        assert!(factory.is_empty());
    }

    #[test]
    fn test_clear_cache_forces_recreation() {
        let factory = CachingLoggerFactory::case_sensitive(CountingHook::default());

        let before = factory.get_logger("k").unwrap();
        factory.clear_cache();
        let after = factory.get_logger("k").unwrap();

        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(factory.creator().created.load(Ordering::SeqCst), 2);
    }
}
