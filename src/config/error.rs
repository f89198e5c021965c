//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid preference sheet URL: {0}")]
    InvalidUrl(String),

    #[error("Cycle length must be at least 1")]
    InvalidCycleLength,

    #[error("Placeholder item name must not be empty")]
    EmptyPlaceholder,

    #[error("Invalid item name in weekly rotation: '{0}'")]
    InvalidItemName(String),

    #[error("Path for {0} must not be empty")]
    EmptyPath(&'static str),

    #[error("Log level must not be empty")]
    EmptyLogLevel,
}
