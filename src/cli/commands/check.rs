//! Implementation of the `logbridge check` command.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;

use crate::adapters::registry::AdapterRegistry;
use crate::application::construct;
use crate::cli::output::{print_report, Report};
use crate::domain::ports::{ConfigSource, Section, LOGGING_SECTION};

#[derive(Debug, Serialize)]
pub struct CheckOutput {
    pub source: String,
    pub configured: bool,
    pub adapter_type: Option<String>,
    pub properties: Vec<(String, String)>,
    pub diagnostics_level: String,
}

impl Report for CheckOutput {
    fn summary(&self) -> String {
        let Some(adapter_type) = &self.adapter_type else {
            return format!("{}: no logging section, loggers will be no-ops", self.source);
        };

        let mut lines = vec![
            format!("Source:      {}", self.source),
            format!("Adapter:     {adapter_type}"),
            format!("Diagnostics: {}", self.diagnostics_level),
        ];
        if self.properties.is_empty() {
            lines.push("Properties:  (none)".to_string());
        } else {
            lines.push("Properties:".to_string());
            for (key, value) in &self.properties {
                lines.push(format!("  {key:<16} {value}"));
            }
        }
        lines.join("\n")
    }
}

pub fn execute(config: Option<PathBuf>, json_mode: bool) -> Result<()> {
    let source = crate::cli::config_source(config)?;
    let diagnostics = source.diagnostics()?;

    let section = source
        .section(LOGGING_SECTION)
        .with_context(|| format!("Invalid configuration in {}", source.describe()))?;

    let result = match section {
        Some(Section::Settings(setting)) => {
            construct(&AdapterRegistry::new(), &setting)
                .with_context(|| format!("Adapter '{}' cannot be constructed", setting.adapter_type))?;
            CheckOutput {
                source: source.describe(),
                configured: true,
                adapter_type: Some(setting.adapter_type.clone()),
                properties: setting
                    .properties
                    .iter()
                    .map(|(key, value)| (key.to_string(), value.to_string()))
                    .collect(),
                diagnostics_level: diagnostics.level,
            }
        }
        Some(Section::Factory(_)) | None => CheckOutput {
            source: source.describe(),
            configured: false,
            adapter_type: None,
            properties: Vec::new(),
            diagnostics_level: diagnostics.level,
        },
    };

    print_report(&result, json_mode)
}
