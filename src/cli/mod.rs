//! Command-line interface for the `logbridge` binary.

pub mod commands;
pub mod output;
pub mod types;

pub use types::{Cli, Commands};

use crate::infrastructure::config::FileConfigSource;
use std::path::PathBuf;

/// Configuration source for an optional `--config` argument.
pub(crate) fn config_source(config: Option<PathBuf>) -> anyhow::Result<FileConfigSource> {
    match config {
        Some(path) => {
            if !path.is_file() {
                anyhow::bail!("Configuration file not found: {}", path.display());
            }
            Ok(FileConfigSource::from_file(path))
        }
        None => Ok(FileConfigSource::new()),
    }
}

/// Report a command failure and exit non-zero.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let chain: Vec<String> = err.chain().map(ToString::to_string).collect();
        let body = serde_json::json!({ "success": false, "error": err.to_string(), "causes": chain });
        eprintln!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}
