use anyhow::bail;
use serde::{Deserialize, Serialize};

/// Settings for the crate's own diagnostic output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    /// Default filter level (trace, debug, info, warn, error); `RUST_LOG` takes precedence
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format (json, pretty)
    #[serde(default)]
    pub format: DiagnosticsFormat,

    /// Colorize pretty output
    #[serde(default = "default_true")]
    pub ansi: bool,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticsFormat {
    Json,
    #[default]
    Pretty,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: DiagnosticsFormat::default(),
            ansi: true,
        }
    }
}

impl DiagnosticsConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.level.to_lowercase().as_str()) {
            bail!("Invalid diagnostics level: {}. Must be one of: {}", self.level, valid_levels.join(", "));
        }
        Ok(())
    }
}

fn default_level() -> String {
    "warn".to_string()
}

const fn default_true() -> bool {
    true
}
