use crate::config::DEFAULT_LOG_FILTER;
use anyhow::{Context, Result};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the global `tracing` subscriber.
///
/// Logs go to stderr so stdout carries only rendered output. `filter` uses
/// `EnvFilter` directive syntax (e.g. `warn`, `httpcodes=debug`). A directive
/// that fails to parse falls back to `DEFAULT_LOG_FILTER` and is reported as
/// a warning instead of failing the command.
pub fn init_logging(filter: &str) -> Result<()> {
    let (env_filter, rejected) = match EnvFilter::try_new(filter) {
        Ok(env_filter) => (env_filter, None),
        Err(err) => (EnvFilter::new(DEFAULT_LOG_FILTER), Some(err)),
    };
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init()
        .context("installing tracing subscriber")?;

    if let Some(err) = rejected {
        warn!(filter, error = %err, "ignoring invalid log filter");
    }
    Ok(())
}
