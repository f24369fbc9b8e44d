//! Logging initialization.
//!
//! CLI commands log compact lines to stderr. The TUI owns the terminal, so it
//! logs to a file (JSON lines) when one is given and stays silent otherwise.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::AppError;

const DEFAULT_DIRECTIVE: &str = "exo_curves=info";

/// Where log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink<'a> {
    Stderr,
    File(&'a Path),
    Off,
}

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
pub fn init_logging(sink: LogSink<'_>) -> Result<(), AppError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_DIRECTIVE))
        .map_err(|e| AppError::input(format!("Failed to create log filter: {e}")))?;

    match sink {
        LogSink::Stderr => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact();
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .init();
        }
        LogSink::File(path) => {
            let file = File::create(path).map_err(|e| {
                AppError::input(format!("Failed to create log file '{}': {e}", path.display()))
            })?;
            let fmt_layer = fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .json();
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .init();
        }
        LogSink::Off => {}
    }

    Ok(())
}
