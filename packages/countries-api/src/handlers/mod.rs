//! HTTP endpoint implementations for countries, reminders, and status.

pub mod country_handlers;
pub mod reminder_handlers;
pub mod request_utils;
pub mod response;
pub mod status_handlers;

pub use country_handlers::{delete_country, get_country, list_countries, post_country};
pub use reminder_handlers::{
    delete_reminder, get_reminder, list_reminders, post_reminder, put_reminder,
};
pub use response::{error_response, ApiError, ErrorResponse};
pub use status_handlers::get_status;
