//! Reminder endpoint handlers.

use hyper::body::{Body, Bytes};
use hyper::{Request, Response};

use crate::router::{AppState, RouterError};

use super::request_utils::{
    build_empty_response, build_json_response, map_store_error_to_router_error, parse_json_body,
    read_request_body_with_timeout, reminder_id, BoxError, MatchitParams, ReminderRequest,
};

/// Lists all reminders ordered by id.
///
/// # Endpoint
/// `GET /reminders`
pub async fn list_reminders<B>(
    _req: Request<B>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let reminders = state
        .reminders
        .list()
        .map_err(map_store_error_to_router_error)?;
    build_json_response(200, &reminders)
}

/// Creates a reminder.
///
/// # Endpoint
/// `POST /reminders`
///
/// # Request Body
/// ```json
/// {"Message": "water the plants"}
/// ```
///
/// # Response
/// - **200 OK**: Returns the stored reminder with its assigned `Id`
///
/// # Errors
/// - **400 Bad Request**: Body is not valid JSON
pub async fn post_reminder<B>(
    req: Request<B>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let body_bytes = read_request_body_with_timeout(
        req,
        state.config.request_timeout_ms,
        state.config.max_body_bytes,
    )
    .await?;
    let request: ReminderRequest = parse_json_body(&body_bytes)?;

    let reminder = state
        .reminders
        .create(request.message)
        .map_err(map_store_error_to_router_error)?;
    tracing::info!(id = reminder.id, "Created reminder");

    build_json_response(200, &reminder)
}

/// Reads a reminder.
///
/// # Endpoint
/// `GET /reminders/{id}`
///
/// # Errors
/// - **400 Bad Request**: Id is not a number
/// - **404 Not Found**: No reminder with this id
pub async fn get_reminder<B>(
    _req: Request<B>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let id = reminder_id(&params)?;
    let reminder = state
        .reminders
        .get(id)
        .map_err(map_store_error_to_router_error)?;
    build_json_response(200, &reminder)
}

/// Replaces the message of a reminder.
///
/// # Endpoint
/// `PUT /reminders/{id}`
///
/// # Errors
/// - **400 Bad Request**: Id is not a number or body is not valid JSON
/// - **413 Payload Too Large**: Body longer than `max_body_bytes`
/// - **404 Not Found**: No reminder with this id
pub async fn put_reminder<B>(
    req: Request<B>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let id = reminder_id(&params)?;
    let body_bytes = read_request_body_with_timeout(
        req,
        state.config.request_timeout_ms,
        state.config.max_body_bytes,
    )
    .await?;
    let request: ReminderRequest = parse_json_body(&body_bytes)?;

    let reminder = state
        .reminders
        .update(id, request.message)
        .map_err(map_store_error_to_router_error)?;
    build_json_response(200, &reminder)
}

/// Deletes a reminder.
///
/// # Endpoint
/// `DELETE /reminders/{id}`
///
/// # Errors
/// - **404 Not Found**: No reminder with this id
pub async fn delete_reminder<B>(
    _req: Request<B>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let id = reminder_id(&params)?;
    state
        .reminders
        .delete(id)
        .map_err(map_store_error_to_router_error)?;
    tracing::info!(id, "Deleted reminder");
    build_empty_response(200)
}
