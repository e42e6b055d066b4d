//! Integration test suite for the core crate.
//!
//! Tests are organized by component:
//! 1. Country store lifecycle and concurrency
//! 2. Reminder repository through its port
//! 3. Configuration layering

mod config_tests;
mod country_store_tests;
mod reminder_repository_tests;
