//! Service configuration.
//!
//! Supports TOML config files, environment variable overrides, and defaults.

use std::env;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for the countries service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Host address to bind to (default: "127.0.0.1")
    pub host: String,
    /// Port to listen on (default: 8080)
    pub port: u16,
    /// Realm announced in `WWW-Authenticate` challenges (default: "test zone")
    pub realm: String,
    /// Accepted basic-auth username (default: "admin")
    pub username: String,
    /// Accepted basic-auth password (default: "admin")
    pub password: String,
    /// Request body read timeout in milliseconds (default: 5000)
    pub request_timeout_ms: u64,
    /// Largest accepted request body in bytes (default: 1 MiB)
    pub max_body_bytes: usize,
    /// Default log filter when `RUST_LOG` is unset (default: "info")
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            realm: "test zone".to_string(),
            username: "admin".to_string(),
            password: "admin".to_string(),
            request_timeout_ms: 5000,
            max_body_bytes: 1024 * 1024,
            log_level: "info".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Loads configuration from a TOML file. Missing keys keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Applies environment variable overrides.
    ///
    /// Variables are prefixed with `COUNTRIES_`, e.g. `COUNTRIES_PORT=9090`
    /// overrides `port`.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|var| env::var(var).ok())
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("COUNTRIES_HOST") {
            self.host = val;
        }
        if let Some(val) = lookup("COUNTRIES_PORT") {
            self.port = val.parse().map_err(|_| ConfigError::InvalidEnv {
                var: "COUNTRIES_PORT",
                value: val,
            })?;
        }
        if let Some(val) = lookup("COUNTRIES_REALM") {
            self.realm = val;
        }
        if let Some(val) = lookup("COUNTRIES_USERNAME") {
            self.username = val;
        }
        if let Some(val) = lookup("COUNTRIES_PASSWORD") {
            self.password = val;
        }
        if let Some(val) = lookup("COUNTRIES_REQUEST_TIMEOUT_MS") {
            self.request_timeout_ms = val.parse().map_err(|_| ConfigError::InvalidEnv {
                var: "COUNTRIES_REQUEST_TIMEOUT_MS",
                value: val,
            })?;
        }
        if let Some(val) = lookup("COUNTRIES_MAX_BODY_BYTES") {
            self.max_body_bytes = val.parse().map_err(|_| ConfigError::InvalidEnv {
                var: "COUNTRIES_MAX_BODY_BYTES",
                value: val,
            })?;
        }
        if let Some(val) = lookup("COUNTRIES_LOG_LEVEL") {
            self.log_level = val;
        }
        Ok(())
    }

    /// Returns the address the server should bind to.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|_| ConfigError::InvalidAddress(addr))
    }

    /// Returns the request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
