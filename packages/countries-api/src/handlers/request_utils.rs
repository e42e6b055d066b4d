//! Request utilities for HTTP endpoints.

use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::CONTENT_TYPE;
use hyper::{Request, Response};
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use tokio::time;

use crate::router::RouterError;
use countries_core::StoreError;

/// Type alias for matchit parameters with explicit lifetimes
pub type MatchitParams<'a, 'b> = matchit::Params<'a, 'b>;

/// Boxed error accepted from request bodies
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Helper function to read request body with timeout and size cap
///
/// A body still incomplete after `timeout_ms` yields `RouterError::Timeout`;
/// one longer than `max_bytes` yields `RouterError::PayloadTooLarge`.
pub async fn read_request_body_with_timeout<B>(
    req: Request<B>,
    timeout_ms: u64,
    max_bytes: usize,
) -> Result<Bytes, RouterError>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let timeout_duration = time::Duration::from_millis(timeout_ms);
    let limited = Limited::new(req.into_body(), max_bytes);
    let body = time::timeout(timeout_duration, limited.collect())
        .await
        .map_err(|_| RouterError::Timeout)?
        .map_err(|e| {
            if e.is::<LengthLimitError>() {
                RouterError::PayloadTooLarge(max_bytes)
            } else {
                RouterError::InternalError(format!("Failed to read request body: {}", e))
            }
        })?;
    Ok(body.to_bytes())
}

/// Decodes a JSON request body.
pub fn parse_json_body<'a, T: Deserialize<'a>>(body: &'a [u8]) -> Result<T, RouterError> {
    serde_json::from_slice(body)
        .map_err(|e| RouterError::BadRequest(format!("Failed to parse request: {}", e)))
}

/// Map StoreError to appropriate RouterError
pub fn map_store_error_to_router_error(e: StoreError) -> RouterError {
    if e.is_validation() {
        RouterError::BadRequest(e.to_string())
    } else {
        RouterError::NotFound(e.to_string())
    }
}

/// Returns the percent-decoded value of a path parameter.
pub fn path_param(params: &MatchitParams<'_, '_>, name: &str) -> Result<String, RouterError> {
    let raw = params
        .get(name)
        .ok_or_else(|| RouterError::BadRequest(format!("Missing path parameter '{}'", name)))?;
    percent_decode_str(raw)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|e| RouterError::BadRequest(format!("Invalid path parameter '{}': {}", raw, e)))
}

/// Parses the numeric reminder id path parameter.
pub fn reminder_id(params: &MatchitParams<'_, '_>) -> Result<u64, RouterError> {
    let raw = path_param(params, "id")?;
    raw.parse()
        .map_err(|e| RouterError::BadRequest(format!("Invalid reminder ID '{}': {}", raw, e)))
}

/// Request to create or update a reminder.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReminderRequest {
    /// Reminder text
    #[serde(default)]
    pub message: String,
}

/// Helper to build HTTP response with proper error handling
pub fn build_response(status: u16, json: Vec<u8>) -> Result<Response<Bytes>, RouterError> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .body(Bytes::from(json))
        .map_err(|e| RouterError::InternalError(format!("Failed to build response: {}", e)))
}

/// Serializes `value` and builds a JSON response.
pub fn build_json_response<T: Serialize>(
    status: u16,
    value: &T,
) -> Result<Response<Bytes>, RouterError> {
    let json = serde_json::to_vec(value)
        .map_err(|e| RouterError::InternalError(format!("Failed to serialize response: {}", e)))?;
    build_response(status, json)
}

/// Helper to build empty HTTP response
pub fn build_empty_response(status: u16) -> Result<Response<Bytes>, RouterError> {
    Response::builder()
        .status(status)
        .body(Bytes::new())
        .map_err(|e| RouterError::InternalError(format!("Failed to build response: {}", e)))
}
