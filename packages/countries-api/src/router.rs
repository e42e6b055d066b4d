//! Matchit routing configuration.

use std::sync::Arc;
use std::time::Instant;

use hyper::body::{Body, Bytes};
use hyper::header::{CONTENT_TYPE, WWW_AUTHENTICATE};
use hyper::{Method, Request, Response};
use matchit::Router as MatchitRouter;

use crate::handlers;
use crate::handlers::request_utils::BoxError;
use crate::middleware::{basic_challenge, BasicAuth};
use crate::status::StatusRecorder;
use countries_core::config::ServiceConfig;
use countries_core::{CountryStore, ReminderRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Country store
    pub countries: Arc<CountryStore>,
    /// Reminder persistence port
    pub reminders: Arc<dyn ReminderRepository>,
    /// Service configuration
    pub config: Arc<ServiceConfig>,
    /// Request statistics
    pub status: Arc<StatusRecorder>,
}

impl AppState {
    /// Creates state with empty stores and fresh statistics.
    pub fn new(
        countries: Arc<CountryStore>,
        reminders: Arc<dyn ReminderRepository>,
        config: Arc<ServiceConfig>,
    ) -> Self {
        Self {
            countries,
            reminders,
            config,
            status: Arc::new(StatusRecorder::new()),
        }
    }
}

/// HTTP request router.
pub struct Router {
    inner: MatchitRouter<RouteHandler>,
    auth: BasicAuth,
    state: AppState,
}

impl Router {
    /// Creates a new router with the service routes.
    ///
    /// Every request must pass `auth` before it is matched against a route.
    pub fn new(state: AppState, auth: BasicAuth) -> Self {
        let mut router = MatchitRouter::new();

        // Country endpoints
        router
            .insert("/countries", RouteHandler::Country)
            .expect("Failed to insert /countries route");
        router
            .insert("/countries/{code}", RouteHandler::Country)
            .expect("Failed to insert /countries/{code} route");

        // Reminder endpoints
        router
            .insert("/reminders", RouteHandler::Reminder)
            .expect("Failed to insert /reminders route");
        router
            .insert("/reminders/{id}", RouteHandler::Reminder)
            .expect("Failed to insert /reminders/{id} route");

        router
            .insert("/.status", RouteHandler::Status)
            .expect("Failed to insert /.status route");

        Self {
            inner: router,
            auth,
            state,
        }
    }

    /// Returns the shared state handed to handlers.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Routes a request and converts any routing error into its HTTP response.
    ///
    /// The outcome is recorded in the status statistics.
    pub async fn handle<B>(&self, req: Request<B>) -> Response<Bytes>
    where
        B: Body,
        B::Error: Into<BoxError>,
    {
        let started = Instant::now();
        let method = req.method().clone();
        let path = req.uri().path().to_string();

        let response = match self.route(req).await {
            Ok(response) => response,
            Err(err) => {
                tracing::debug!("{} {} failed: {}", method, path, err);
                Response::from(err)
            }
        };

        let elapsed = started.elapsed();
        tracing::debug!(
            "{} {} -> {} in {:?}",
            method,
            path,
            response.status().as_u16(),
            elapsed
        );
        self.state.status.record(response.status().as_u16(), elapsed);
        response
    }

    /// Authenticates and routes an incoming request to the appropriate handler.
    ///
    /// # Arguments
    /// * `req` - HTTP request
    ///
    /// # Returns
    /// `Result<Response<Bytes>, RouterError>` containing the response or an error.
    pub async fn route<B>(&self, req: Request<B>) -> Result<Response<Bytes>, RouterError>
    where
        B: Body,
        B::Error: Into<BoxError>,
    {
        self.auth.check(&req)?;

        let path = req.uri().path().to_string();
        match self.inner.at(&path) {
            Ok(matched) => {
                let handler = matched.value;
                handler
                    .handle(req, matched.params, self.state.clone())
                    .await
            }
            Err(_) => Err(RouterError::NotFound(format!("No route found for {}", path))),
        }
    }
}

/// Route handler function.
enum RouteHandler {
    Country,
    Reminder,
    Status,
}

impl RouteHandler {
    /// Handles a request with the given route parameters.
    async fn handle<B>(
        &self,
        req: Request<B>,
        params: matchit::Params<'_, '_>,
        state: AppState,
    ) -> Result<Response<Bytes>, RouterError>
    where
        B: Body,
        B::Error: Into<BoxError>,
    {
        match self {
            RouteHandler::Country => {
                let has_code_param = params.get("code").is_some();
                if req.method() == Method::GET && !has_code_param {
                    handlers::list_countries(req, params, state).await
                } else if req.method() == Method::POST && !has_code_param {
                    handlers::post_country(req, params, state).await
                } else if req.method() == Method::GET && has_code_param {
                    handlers::get_country(req, params, state).await
                } else if req.method() == Method::DELETE && has_code_param {
                    handlers::delete_country(req, params, state).await
                } else {
                    Err(RouterError::MethodNotAllowed)
                }
            }
            RouteHandler::Reminder => {
                let has_id_param = params.get("id").is_some();
                if req.method() == Method::GET && !has_id_param {
                    handlers::list_reminders(req, params, state).await
                } else if req.method() == Method::POST && !has_id_param {
                    handlers::post_reminder(req, params, state).await
                } else if req.method() == Method::GET && has_id_param {
                    handlers::get_reminder(req, params, state).await
                } else if req.method() == Method::PUT && has_id_param {
                    handlers::put_reminder(req, params, state).await
                } else if req.method() == Method::DELETE && has_id_param {
                    handlers::delete_reminder(req, params, state).await
                } else {
                    Err(RouterError::MethodNotAllowed)
                }
            }
            RouteHandler::Status => {
                if req.method() == Method::GET {
                    handlers::get_status(req, params, state).await
                } else {
                    Err(RouterError::MethodNotAllowed)
                }
            }
        }
    }
}

/// Router error type.
#[derive(Debug)]
pub enum RouterError {
    Unauthorized { realm: String },
    MethodNotAllowed,
    InternalError(String),
    Timeout,
    BadRequest(String),
    NotFound(String),
    PayloadTooLarge(usize),
}

impl RouterError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            RouterError::Unauthorized { .. } => 401,
            RouterError::MethodNotAllowed => 405,
            RouterError::InternalError(_) => 500,
            RouterError::Timeout => 408,
            RouterError::BadRequest(_) => 400,
            RouterError::NotFound(_) => 404,
            RouterError::PayloadTooLarge(_) => 413,
        }
    }
}

impl std::fmt::Display for RouterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouterError::Unauthorized { .. } => write!(f, "Not Authorized"),
            RouterError::MethodNotAllowed => write!(f, "Method Not Allowed"),
            RouterError::InternalError(msg) => write!(f, "Internal Error: {}", msg),
            RouterError::Timeout => write!(f, "Request Timeout"),
            RouterError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            RouterError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            RouterError::PayloadTooLarge(limit) => {
                write!(f, "Payload Too Large: body exceeds {} bytes", limit)
            }
        }
    }
}

impl std::error::Error for RouterError {}

impl From<RouterError> for Response<Bytes> {
    fn from(err: RouterError) -> Self {
        let status = err.status_code();
        let message = match &err {
            RouterError::Unauthorized { .. } => "Not Authorized".to_string(),
            RouterError::MethodNotAllowed => "Method Not Allowed".to_string(),
            RouterError::InternalError(msg) => msg.clone(),
            RouterError::Timeout => "Request Timeout".to_string(),
            RouterError::BadRequest(msg) => msg.clone(),
            RouterError::NotFound(msg) => msg.clone(),
            RouterError::PayloadTooLarge(limit) => format!("Body exceeds {} bytes", limit),
        };

        let error_response = handlers::error_response(status, message, None);
        let body = serde_json::to_vec(&error_response)
            .unwrap_or_else(|e| format!("{{\"success\":false,\"error\":{{\"code\":\"500\",\"message\":\"Failed to serialize error: {}\"}}}}", e).into_bytes());

        let mut builder = Response::builder()
            .status(status)
            .header(CONTENT_TYPE, "application/json");
        if let RouterError::Unauthorized { realm } = &err {
            builder = builder.header(WWW_AUTHENTICATE, basic_challenge(realm));
        }

        builder.body(Bytes::from(body)).unwrap_or_else(|_| {
            let mut fallback = Response::new(Bytes::from("Internal Server Error"));
            *fallback.status_mut() = hyper::StatusCode::INTERNAL_SERVER_ERROR;
            fallback
        })
    }
}
