//! Rendering of `emit` and `check` results, as text or pretty JSON.

use anyhow::Result;
use serde::Serialize;
use std::io::{self, Write};

/// Result of a `logbridge` subcommand.
pub trait Report: Serialize {
    /// Text shown when `--json` is not given.
    fn summary(&self) -> String;
}

pub fn write_report<T: Report>(out: &mut impl Write, report: &T, json_mode: bool) -> Result<()> {
    if json_mode {
        serde_json::to_writer_pretty(&mut *out, report)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", report.summary())?;
    }
    Ok(())
}

pub fn print_report<T: Report>(report: &T, json_mode: bool) -> Result<()> {
    write_report(&mut io::stdout().lock(), report, json_mode)
}

/// Reports go to stderr when stdout belongs to the log sink.
pub fn eprint_report<T: Report>(report: &T, json_mode: bool) -> Result<()> {
    write_report(&mut io::stderr().lock(), report, json_mode)
}
