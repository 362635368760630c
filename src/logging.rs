//! Tracing setup for the binary. The library only emits events.

use std::io::IsTerminal;

use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(tracing::subscriber::SetGlobalDefaultError),
}

/// Installs a stderr subscriber filtered by `RUST_LOG`, defaulting to `info`.
///
/// # Errors
/// If a global subscriber is already installed.
pub fn init() -> Result<(), LoggingError> {
    let layer = fmt::layer()
        .with_target(true)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    let subscriber = Registry::default().with(build_env_filter()).with(layer);
    tracing::subscriber::set_global_default(subscriber).map_err(LoggingError::SetGlobal)
}

fn build_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}
