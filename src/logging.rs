//! Logging bootstrap for embedders.
//!
//! Installs a global `tracing` subscriber once per process. Later calls are
//! no-ops, and initialization never panics.

use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};

static INSTALLED: OnceLock<()> = OnceLock::new();

/// Installs a formatted subscriber filtered by `level` (an `EnvFilter`
/// directive such as `"info"` or `"tabmem=debug"`). `RUST_LOG` wins when set.
///
/// # Errors
/// - Returns an error when `level` is not a valid filter directive.
/// - Returns an error when another global subscriber is already installed.
pub fn init_logging(level: &str) -> Result<()> {
    if INSTALLED.get().is_some() {
        return Ok(());
    }

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .map_err(|err| Error::Logging(format!("invalid log level `{level}`: {err}")))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|err| Error::Logging(err.to_string()))?;

    let _ = INSTALLED.set(());
    Ok(())
}
