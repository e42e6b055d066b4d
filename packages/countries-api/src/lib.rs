//! REST API server for the countries service.
//!
//! Provides HTTP endpoints for countries and reminders, basic-auth
//! middleware, request statistics, and request routing.

pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;
pub mod status;
