//! Tracing subscriber setup.
//!
//! Logs go to stderr so the assignment tables printed on stdout stay clean.
//! `RUST_LOG` overrides the configured filter when set.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LoggingConfig;

/// Errors raised while installing the subscriber
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Invalid log filter '{filter}': {message}")]
    InvalidFilter { filter: String, message: String },

    #[error("Failed to initialize tracing subscriber: {0}")]
    Init(String),
}

/// Install the global subscriber described by `logging_config`.
pub fn init_tracing(logging_config: &LoggingConfig) -> Result<(), LoggingError> {
    let env_filter = build_env_filter(&logging_config.level)?;

    let layer = if logging_config.json {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_writer(std::io::stderr)
            .with_filter(env_filter)
            .boxed()
    } else {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_filter(env_filter)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;

    tracing::debug!(filter = %logging_config.level, json = logging_config.json, "Tracing initialized");
    Ok(())
}

fn build_env_filter(configured: &str) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(configured).map_err(|e| LoggingError::InvalidFilter {
        filter: configured.to_string(),
        message: e.to_string(),
    })
}
