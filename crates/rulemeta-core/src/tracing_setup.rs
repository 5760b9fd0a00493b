use std::fs::OpenOptions;

use anyhow::{Context, Result};
use tracing_subscriber::{filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer};

use crate::constants::env;

/// Install the global subscriber.
///
/// The TUI owns the terminal, so nothing is ever written to stdout/stderr.
/// Set `RULEMETA_LOG_FILE` to append DEBUG output to a file instead.
pub fn init_tracing() -> Result<()> {
    let file_logging = std::env::var(env::LOG_FILE).ok();
    let registry = tracing_subscriber::registry();

    if let Some(log_path) = file_logging {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Failed to open log file: {}", log_path))?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(true)
            .with_filter(LevelFilter::DEBUG);

        registry
            .with(file_layer)
            .try_init()
            .context("Failed to install tracing subscriber")?;
    } else {
        registry
            .try_init()
            .context("Failed to install tracing subscriber")?;
    }

    Ok(())
}
