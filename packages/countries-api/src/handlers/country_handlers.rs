//! Country endpoint handlers.

use hyper::body::{Body, Bytes};
use hyper::{Request, Response};

use crate::router::{AppState, RouterError};
use countries_core::Country;

use super::request_utils::{
    build_empty_response, build_json_response, map_store_error_to_router_error, parse_json_body,
    path_param, read_request_body_with_timeout, BoxError, MatchitParams,
};

/// Lists all countries.
///
/// # Endpoint
/// `GET /countries`
///
/// # Response
/// - **200 OK**: JSON array of countries, in no particular order
/// ```json
/// [{"Code": "FR", "Name": "France"}, {"Code": "US", "Name": "United States"}]
/// ```
pub async fn list_countries<B>(
    _req: Request<B>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let countries = state.countries.list();
    build_json_response(200, &countries)
}

/// Creates or replaces a country.
///
/// # Endpoint
/// `POST /countries`
///
/// # Request Body
/// ```json
/// {"Code": "FR", "Name": "France"}
/// ```
///
/// # Response
/// - **200 OK**: Returns the stored country
///
/// # Errors
/// - **400 Bad Request**: Body is not valid JSON, or `Code` / `Name` is missing or empty
/// - **408 Request Timeout**: Body not received within the request timeout
/// - **413 Payload Too Large**: Body longer than `max_body_bytes`
///
/// # Example
/// ```bash
/// curl -u admin:admin -d '{"Code":"FR","Name":"France"}' http://127.0.0.1:8080/countries
/// ```
pub async fn post_country<B>(
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
    let country: Country = parse_json_body(&body_bytes)?;

    let stored = state
        .countries
        .upsert(country)
        .map_err(map_store_error_to_router_error)?;
    tracing::info!(code = %stored.code, "Stored country");

    build_json_response(200, &stored)
}

/// Reads a single country.
///
/// # Endpoint
/// `GET /countries/{code}`
///
/// # Response
/// - **200 OK**: Returns the country
///
/// # Errors
/// - **404 Not Found**: No country stored under the code
pub async fn get_country<B>(
    _req: Request<B>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let code = path_param(&params, "code")?;
    let country = state
        .countries
        .get(&code)
        .map_err(map_store_error_to_router_error)?;
    build_json_response(200, &country)
}

/// Deletes a country.
///
/// # Endpoint
/// `DELETE /countries/{code}`
///
/// # Response
/// - **200 OK**: Empty body, whether or not the country existed. A code that
///   does not percent-decode to UTF-8 can never have been stored, so it is
///   treated as absent.
pub async fn delete_country<B>(
    _req: Request<B>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    match path_param(&params, "code") {
        Ok(code) => {
            state.countries.delete(&code);
            tracing::info!(code = %code, "Deleted country");
        }
        Err(err) => tracing::debug!("Delete of undecodable code ignored: {}", err),
    }
    build_empty_response(200)
}
