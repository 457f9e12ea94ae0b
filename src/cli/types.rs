//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::models::Level;

#[derive(Parser)]
#[command(name = "logbridge")]
#[command(about = "logbridge - inspect and exercise logging adapter configuration", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the configured adapter and write one entry through it
    Emit {
        /// Configuration file (defaults to logbridge.yaml)
        #[arg(short, long, env = "LOGBRIDGE_CONFIG")]
        config: Option<PathBuf>,

        /// Logger key
        #[arg(short, long, default_value = "logbridge")]
        logger: String,

        /// Entry level (trace, debug, info, warn, error, fatal)
        #[arg(long, default_value = "info", value_parser = parse_message_level)]
        level: Level,

        /// Message text
        message: String,
    },

    /// Validate a configuration file and show the adapter it selects
    Check {
        /// Configuration file (defaults to logbridge.yaml)
        #[arg(short, long, env = "LOGBRIDGE_CONFIG")]
        config: Option<PathBuf>,
    },
}

fn parse_message_level(value: &str) -> Result<Level, String> {
    let level: Level = value.parse().map_err(|err: crate::domain::errors::LoggingError| err.to_string())?;
    if level.is_sentinel() {
        return Err(format!("'{value}' is a threshold, not a message level"));
    }
    Ok(level)
}
