/// Logging bootstrap (tracing + tracing-subscriber).
///
/// The game owns the terminal in raw mode, so log lines go to a file
/// instead of stderr. `RUST_LOG` wins over the configured filter.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};

use crate::config::LogConfig;

/// Install the global subscriber. Returns `Ok(false)` when the log file
/// cannot be opened; the game then runs with logging disabled.
pub fn init_telemetry(cfg: &LogConfig) -> Result<bool> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let file = match OpenOptions::new().create(true).append(true).open(&cfg.file) {
        Ok(f) => f,
        Err(_) => return Ok(false),
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .context("installing tracing subscriber")?;

    tracing::info!(file = %cfg.file.display(), filter = %cfg.filter, "telemetry initialized");
    Ok(true)
}
