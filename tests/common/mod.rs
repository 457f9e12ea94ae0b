//! Common test utilities for integration tests
//!
//! Provides shared fixtures and helpers used across multiple integration test files.

#![allow(dead_code)]

use logbridge::{
    CreateLogger, FnConfigSource, LogManager, LogSetting, Logger, NoOpLogger, Properties, Section,
};
use parking_lot::Mutex;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Create a temporary directory for test isolation
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Write `yaml` as `logbridge.yaml` inside `dir`
pub fn write_config(dir: &TempDir, yaml: &str) -> PathBuf {
    let path = dir.path().join("logbridge.yaml");
    std::fs::write(&path, yaml).expect("Failed to write config");
    path
}

/// A manager whose source always yields the given declarative settings
pub fn manager_with_settings(adapter_type: &str, properties: Properties) -> LogManager {
    let setting = LogSetting::new(adapter_type, properties);
    LogManager::with_source(FnConfigSource::new(move |_| {
        Ok(Some(Section::Settings(setting.clone())))
    }))
}

/// A manager whose source reports no configuration at all
pub fn unconfigured_manager() -> LogManager {
    LogManager::with_source(FnConfigSource::new(|_| Ok(None)))
}

/// In-memory writer whose contents stay readable after being handed to a sink
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Logger construction hook that counts calls and sleeps to widen race windows
pub struct SlowCountingHook {
    pub created: AtomicUsize,
    pub delay: Duration,
}

impl SlowCountingHook {
    pub fn new(delay: Duration) -> Self {
        Self {
            created: AtomicUsize::new(0),
            delay,
        }
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

impl CreateLogger for SlowCountingHook {
    fn create_logger(&self, _name: &str) -> Option<Arc<dyn Logger>> {
        self.created.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(self.delay);
        Some(Arc::new(NoOpLogger::new()))
    }
}
