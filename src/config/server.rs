//! Server configuration

use serde::Deserialize;
use std::net::SocketAddr;

use super::error::ValidationError;

/// Longest request timeout accepted, in seconds.
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// HTTP listener, log output, and deployment settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    /// `production` switches logs to JSON and makes a database mandatory.
    pub environment: Environment,

    /// Log filter directive, used when `RUST_LOG` is unset
    pub log_level: String,

    /// Requests running longer than this are answered with 408
    pub request_timeout_secs: u64,
}

/// Deployment environment.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            environment: Environment::Development,
            log_level: "info,release_tracker=debug,sqlx=warn,tower_http=debug".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    /// The address the listener binds to.
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|_| ValidationError::InvalidBindAddress(addr))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > MAX_REQUEST_TIMEOUT_SECS {
            return Err(ValidationError::InvalidTimeout);
        }
        self.socket_addr().map(|_| ())
    }
}
