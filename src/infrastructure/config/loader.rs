use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::{Path, PathBuf};

use crate::domain::errors::{LoggingError, LoggingResult};
use crate::domain::ports::{ConfigSource, Section};
use crate::infrastructure::logging::DiagnosticsConfig;

use super::section::{parse_section, SectionDocument};

/// Default configuration file, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "logbridge.yaml";

/// Prefix of environment variables overriding file values.
pub const DEFAULT_ENV_PREFIX: &str = "LOGBRIDGE_";

/// Section holding the crate's own diagnostic settings.
pub const DIAGNOSTICS_SECTION: &str = "diagnostics";

/// Configuration source with hierarchical merging.
///
/// Precedence (lowest to highest):
/// 1. The YAML file (`logbridge.yaml` unless overridden; a missing file is empty)
/// 2. Environment variables (`LOGBRIDGE_*`, `__` separating nested keys)
///
/// For example `LOGBRIDGE_LOGGING__FACTORY_ADAPTER__TYPE=console` selects the console
/// adapter and `LOGBRIDGE_LOGGING__FACTORY_ADAPTER__ARGS__LEVEL=warn` sets its level.
#[derive(Debug, Clone)]
pub struct FileConfigSource {
    path: PathBuf,
    env_prefix: Option<String>,
}

impl FileConfigSource {
    pub fn new() -> Self {
        Self::from_file(DEFAULT_CONFIG_FILE)
    }

    /// Source reading `path` instead of the default file.
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            env_prefix: Some(DEFAULT_ENV_PREFIX.to_string()),
        }
    }

    #[must_use]
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Ignore environment overrides.
    #[must_use]
    pub fn without_env(mut self) -> Self {
        self.env_prefix = None;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn figment(&self) -> Figment {
        let figment = Figment::new().merge(Yaml::file(&self.path));
        match &self.env_prefix {
            Some(prefix) => figment.merge(Env::prefixed(prefix).split("__")),
            None => figment,
        }
    }

    /// Diagnostic settings from the `diagnostics` section, defaults filling the gaps.
    pub fn diagnostics(&self) -> Result<DiagnosticsConfig> {
        let config: DiagnosticsConfig = Figment::new()
            .merge(Serialized::default(DIAGNOSTICS_SECTION, DiagnosticsConfig::default()))
            .merge(self.figment())
            .extract_inner(DIAGNOSTICS_SECTION)
            .with_context(|| format!("Failed to load diagnostics settings from {}", self.path.display()))?;

        config.validate()?;
        Ok(config)
    }
}

impl Default for FileConfigSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSource for FileConfigSource {
    fn section(&self, name: &str) -> LoggingResult<Option<Section>> {
        if name.trim().is_empty() {
            return Err(LoggingError::InvalidArgument {
                name: "section",
                reason: "section name must not be empty".to_string(),
            });
        }

        let document: SectionDocument = match self.figment().extract_inner(name) {
            Ok(document) => document,
            Err(err) if err.missing() => return Ok(None),
            Err(err) => {
                return Err(LoggingError::configuration_with(
                    format!("failed to read section '{name}' from {}", self.describe()),
                    err,
                ))
            }
        };

        Ok(parse_section(document)?.map(Section::Settings))
    }

    fn describe(&self) -> String {
        match &self.env_prefix {
            Some(prefix) => format!("{} with {prefix}* overrides", self.path.display()),
            None => self.path.display().to_string(),
        }
    }
}
