//! Tracing subscriber setup
//!
//! The TUI owns the terminal, so it only logs when a file is given. Line mode
//! logs to stderr.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Where log events go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
    Disabled,
}

/// Install the global subscriber
///
/// # Errors
/// Returns an error if the log file cannot be opened or a subscriber is
/// already installed.
pub fn init(target: LogTarget<'_>, level: Level) -> Result<()> {
    let builder = FmtSubscriber::builder().with_max_level(level).with_target(false);

    match target {
        LogTarget::Disabled => Ok(()),
        LogTarget::Stderr => tracing::subscriber::set_global_default(
            builder.with_writer(std::io::stderr).finish(),
        )
        .context("setting default subscriber failed"),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;

            tracing::subscriber::set_global_default(
                builder
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .finish(),
            )
            .context("setting default subscriber failed")
        }
    }
}
