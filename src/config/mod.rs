//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CHORE_ROTA` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use chore_rota::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("History kept in {}", config.history.path.display());
//! ```

mod error;
mod history;
mod logging;
mod output;
mod preferences;
mod rotation;

pub use error::{ConfigError, ValidationError};
pub use history::HistoryConfig;
pub use logging::LoggingConfig;
pub use output::OutputConfig;
pub use preferences::{PreferenceLocation, PreferencesConfig};
pub use rotation::RotationConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults; only the preference location must be supplied.
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Preference sheet location and placeholder row
    #[serde(default)]
    pub preferences: PreferencesConfig,

    /// History file
    #[serde(default)]
    pub history: HistoryConfig,

    /// Cycle timing and weekly-rotating items
    #[serde(default)]
    pub rotation: RotationConfig,

    /// Announcement and chart output
    #[serde(default)]
    pub output: OutputConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present
    /// 2. Reads environment variables with `CHORE_ROTA` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CHORE_ROTA__PREFERENCES__URL=...` -> `preferences.url = ...`
    /// - `CHORE_ROTA__ROTATION__CYCLE_LENGTH=4` -> `rotation.cycle_length = 4`
    /// - `CHORE_ROTA__ROTATION__WEEKLY_ROTATING=Wild,Lawn` -> a list
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CHORE_ROTA")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("rotation.weekly_rotating")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.preferences.validate()?;
        self.history.validate()?;
        self.rotation.validate()?;
        self.output.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
