//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `RELEASE_TRACKER`
//! prefix and nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use release_tracker::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod database;
mod error;
mod server;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

use crate::domain::validation::ValidationPolicy;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a development
/// server on the in-memory store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection, or none)
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Deployment-specific input rules
    #[serde(default)]
    pub validation: ValidationPolicy,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `RELEASE_TRACKER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `RELEASE_TRACKER__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `RELEASE_TRACKER__DATABASE__URL=...` -> `database.url = ...`
    /// - `RELEASE_TRACKER__VALIDATION__REQUIRE_DUE_DATE=true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("RELEASE_TRACKER")
                    .prefix_separator("__")
                    .separator("__")
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
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        if self.is_production() && !self.database.is_configured() {
            return Err(ValidationError::DatabaseRequiredInProduction);
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.environment == Environment::Production
    }
}
