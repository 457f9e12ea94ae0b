//! Implementation of the `logbridge emit` command.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::adapters::registry::AdapterRegistry;
use crate::application::LogManager;
use crate::cli::output::{eprint_report, Report};
use crate::domain::models::Level;
use crate::domain::ports::{Logger, LoggerExt};
use crate::infrastructure::logging::init_diagnostics;

#[derive(Debug, Serialize)]
pub struct EmitOutput {
    pub logger: String,
    pub level: Level,
    pub written: bool,
}

impl Report for EmitOutput {
    fn summary(&self) -> String {
        if self.written {
            format!("{} entry written by '{}'", self.level, self.logger)
        } else {
            format!("{} is disabled for '{}', nothing written", self.level, self.logger)
        }
    }
}

pub fn execute(config: Option<PathBuf>, logger: String, level: Level, message: String, json_mode: bool) -> Result<()> {
    let source = crate::cli::config_source(config)?;
    init_diagnostics(&source.diagnostics()?)?;

    let manager = LogManager::from_parts(Arc::new(source), AdapterRegistry::new());
    let handle = manager
        .get_logger(&logger)
        .with_context(|| format!("Failed to obtain logger '{logger}'"))?;

    let written = handle.is_enabled(level);
    handle.log(level, &message);

    let result = EmitOutput { logger, level, written };
    if json_mode || !written {
        eprint_report(&result, json_mode)?;
    }
    Ok(())
}
