//! Status endpoint handler.

use hyper::body::Bytes;
use hyper::{Request, Response};

use crate::router::{AppState, RouterError};

use super::request_utils::{build_json_response, MatchitParams};

/// Reports request statistics.
///
/// # Endpoint
/// `GET /.status`
///
/// # Response
/// - **200 OK**: Uptime, per-status-code counts, and response time totals.
///   The status request itself is counted once it completes.
pub async fn get_status<B>(
    _req: Request<B>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    build_json_response(200, &state.status.snapshot())
}
