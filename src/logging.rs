//! Logging setup.
//!
//! Logging is off unless `--log <PATH>` is given. Records never go to the
//! terminal: the dispatcher measures what the sub-tool prints, and stray
//! lines would skew that.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Install the global subscriber writing to `log_path`, if one was given.
///
/// The level filter comes from `RUST_LOG` and defaults to `debug`.
pub fn init(log_path: Option<&Path>) -> Result<()> {
    let Some(log_path) = log_path else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}
