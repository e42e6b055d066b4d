//! Core state for the countries service.
//!
//! Provides the in-memory country store, the reminder repository port
//! with its in-memory adapter, error types, and service configuration.

pub mod config;
pub mod country;
pub mod error;
pub mod reminder;

pub use country::{Country, CountryStore};
pub use error::{ConfigError, StoreError};
pub use reminder::{MemoryReminderRepository, Reminder, ReminderRepository};
