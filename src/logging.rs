use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};

/// Filter used when `TODO_LOG` is unset.
const DEFAULT_FILTER: &str = "warn";

/// Where log records should go.
pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
    /// No logger is installed, so `log` macros are no-ops.
    Off,
}

pub fn init(target: LogTarget<'_>) -> Result<()> {
    let target = match target {
        LogTarget::Off => return Ok(()),
        LogTarget::Stderr => env_logger::Target::Stderr,
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            env_logger::Target::Pipe(Box::new(file))
        }
    };

    let filter = std::env::var("TODO_LOG").unwrap_or_else(|_| DEFAULT_FILTER.into());
    env_logger::Builder::new()
        .parse_filters(&filter)
        .target(target)
        .format_timestamp_secs()
        .try_init()
        .context("logger already initialized")?;
    Ok(())
}
