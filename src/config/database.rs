//! Database configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Upper bound on `max_connections`.
const MAX_POOL_SIZE: u32 = 100;

/// PostgreSQL connection settings.
///
/// An empty `url` means no database: the service runs on the in-memory store.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub min_connections: u32,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,

    /// Apply `migrations/` on startup
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            min_connections: 1,
            max_connections: 10,
            acquire_timeout_secs: 30,
            idle_timeout_secs: 600,
            run_migrations: false,
        }
    }
}

impl DatabaseConfig {
    /// True when a PostgreSQL URL is configured.
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.is_configured() {
            return Ok(());
        }
        if !self.url.starts_with("postgres://") && !self.url.starts_with("postgresql://") {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        if self.min_connections > self.max_connections {
            return Err(ValidationError::InvalidPoolSize);
        }
        if self.max_connections > MAX_POOL_SIZE {
            return Err(ValidationError::PoolSizeTooLarge);
        }
        Ok(())
    }
}
