//! Store error types.

use thiserror::Error;

/// Errors returned by the country store and the reminder repository.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Country submitted without a code
    #[error("Validation error: missing code")]
    MissingCode,

    /// Country submitted without a name
    #[error("Validation error: missing name")]
    MissingName,

    /// No country stored under the code
    #[error("Country '{code}' not found")]
    CountryNotFound { code: String },

    /// No reminder stored under the id
    #[error("Reminder {id} not found")]
    ReminderNotFound { id: u64 },
}

impl StoreError {
    /// Returns true for errors caused by an invalid input record.
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::MissingCode | StoreError::MissingName)
    }

    /// Returns true for errors caused by a missing record.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::CountryNotFound { .. } | StoreError::ReminderNotFound { .. }
        )
    }
}

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for [`crate::config::ServiceConfig`]
    #[error("Invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// Environment override has an unparseable value
    #[error("Invalid value for {var}: {value}")]
    InvalidEnv { var: &'static str, value: String },

    /// Host and port do not form a socket address
    #[error("Invalid listen address '{0}'")]
    InvalidAddress(String),
}
