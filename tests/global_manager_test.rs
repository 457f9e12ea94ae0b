//! The process-wide log manager.
//!
//! Kept to a single test so nothing else in this binary races on the global instance.

use logbridge::{global, CapturingLoggerFactory, LogConfiguration, Logger, LoggerExt, Properties};
use std::sync::Arc;

#[test]
fn test_global_manager_lifecycle() {
    let capture = Arc::new(CapturingLoggerFactory::default());
    global::set_adapter(capture.clone());

    let logger = global::get_logger("global").unwrap();
    logger.warn("through the global manager");
    assert_eq!(capture.last_event().unwrap().message, "through the global manager");

    global::configure(LogConfiguration::adapter("noop", Properties::new())).unwrap();
    let silent = global::get_logger("global").unwrap();
    assert!(!silent.is_fatal_enabled());

    // Handed-out loggers keep writing to the factory that created them.
    logger.error("after reconfiguration");
    assert_eq!(capture.events().len(), 2);

    assert!(global::configure(LogConfiguration::default()).is_err());
    assert!(!global::global().get_logger("global").unwrap().is_info_enabled());
}
