//! JSON envelope written for every failed request.
//!
//! Successful country and reminder responses are bare JSON values; only
//! errors are wrapped, so clients can tell the two apart by `success`.

use serde::Serialize;

/// The `error` object of a failure body.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// HTTP status as a decimal string, e.g. `"404"`
    pub code: String,
    /// Human-readable reason, such as a validation message or the unmatched path
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Top-level failure body: `{"success": false, "error": {...}}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ApiError,
}

/// Builds the failure body for HTTP status `code`.
pub fn error_response(code: u16, message: String, details: Option<String>) -> ErrorResponse {
    ErrorResponse {
        success: false,
        error: ApiError {
            code: code.to_string(),
            message,
            details,
        },
    }
}
