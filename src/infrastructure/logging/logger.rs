use anyhow::{Context, Result};
use std::io;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use super::config::{DiagnosticsConfig, DiagnosticsFormat};
use crate::adapters::sinks::BRIDGE_TARGET;

/// Install a global `tracing` subscriber for the crate's diagnostics (and anything
/// bridged through the tracing sink), writing to stderr.
///
/// Bridged entries are let through at every level; the tracing sink's own `level`
/// property is their threshold.
///
/// # Errors
/// Returns an error if the level is invalid or a global subscriber is already installed.
pub fn init_diagnostics(config: &DiagnosticsConfig) -> Result<()> {
    let default_level = parse_level(&config.level)?;

    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy()
        .add_directive(format!("{BRIDGE_TARGET}=trace").parse()?);

    let layer = match config.format {
        DiagnosticsFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(io::stderr)
            .with_target(true)
            .with_thread_names(true)
            .with_filter(env_filter)
            .boxed(),
        DiagnosticsFormat::Pretty => tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_ansi(config.ansi)
            .with_target(true)
            .with_filter(env_filter)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .context("Failed to install diagnostics subscriber")?;

    tracing::debug!(
        target: "logbridge",
        level = %config.level,
        format = ?config.format,
        "diagnostics initialized"
    );
    Ok(())
}

/// Parse a diagnostics level name.
fn parse_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!("Invalid diagnostics level: {level}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert!(matches!(parse_level("trace"), Ok(Level::TRACE)));
        assert!(matches!(parse_level("WARN"), Ok(Level::WARN)));
        assert!(matches!(parse_level("error"), Ok(Level::ERROR)));
        assert!(parse_level("verbose").is_err());
    }

    #[test]
    fn test_invalid_level_fails_before_installing() {
        let config = DiagnosticsConfig {
            level: "loud".to_string(),
            ..DiagnosticsConfig::default()
        };
        assert!(init_diagnostics(&config).is_err());
    }
}
