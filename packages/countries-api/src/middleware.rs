//! HTTP Basic authentication applied before routing.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hyper::header::{HeaderValue, AUTHORIZATION};
use hyper::Request;

use crate::router::RouterError;

/// Decides whether a user id and password pair may access the API.
pub trait Authenticator: Send + Sync {
    /// Returns true if the credentials are accepted.
    fn authenticate(&self, user_id: &str, password: &str) -> bool;
}

impl<F> Authenticator for F
where
    F: Fn(&str, &str) -> bool + Send + Sync,
{
    fn authenticate(&self, user_id: &str, password: &str) -> bool {
        self(user_id, password)
    }
}

/// Accepts exactly one configured username and password.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Authenticator for StaticCredentials {
    fn authenticate(&self, user_id: &str, password: &str) -> bool {
        user_id == self.username && password == self.password
    }
}

/// Basic-auth gate consulted for every request before route matching.
#[derive(Clone)]
pub struct BasicAuth {
    realm: String,
    authenticator: Arc<dyn Authenticator>,
}

impl BasicAuth {
    /// Creates a gate announcing `realm` in its challenges.
    pub fn new(realm: impl Into<String>, authenticator: Arc<dyn Authenticator>) -> Self {
        Self {
            realm: realm.into(),
            authenticator,
        }
    }

    /// Realm sent in `WWW-Authenticate`.
    pub fn realm(&self) -> &str {
        &self.realm
    }

    /// Checks the request's `Authorization` header.
    ///
    /// # Returns
    /// `Result<String, RouterError>` with the authenticated user id, or
    /// `RouterError::Unauthorized` carrying the realm to challenge with.
    pub fn check<B>(&self, req: &Request<B>) -> Result<String, RouterError> {
        let unauthorized = || RouterError::Unauthorized {
            realm: self.realm.clone(),
        };

        let header = req.headers().get(AUTHORIZATION).ok_or_else(|| {
            tracing::debug!("Request to {} without credentials", req.uri().path());
            unauthorized()
        })?;
        let (user_id, password) = parse_basic_credentials(header).ok_or_else(|| {
            tracing::warn!("Malformed Authorization header on {}", req.uri().path());
            unauthorized()
        })?;

        if self.authenticator.authenticate(&user_id, &password) {
            Ok(user_id)
        } else {
            tracing::warn!(user = %user_id, "Rejected credentials");
            Err(unauthorized())
        }
    }
}

impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth")
            .field("realm", &self.realm)
            .finish_non_exhaustive()
    }
}

/// Formats the `WWW-Authenticate` value for `realm`.
///
/// `"` and `\` are backslash-escaped so the realm stays one quoted-string.
pub fn basic_challenge(realm: &str) -> String {
    let mut challenge = String::with_capacity(realm.len() + 14);
    challenge.push_str("Basic realm=\"");
    for ch in realm.chars() {
        if ch == '"' || ch == '\\' {
            challenge.push('\\');
        }
        challenge.push(ch);
    }
    challenge.push('"');
    challenge
}

/// Extracts `(user_id, password)` from a `Basic` authorization header value.
///
/// The scheme name is matched case-insensitively. Returns `None` for any
/// other scheme, invalid base64, non-UTF-8 credentials, or a missing `:`.
pub fn parse_basic_credentials(header: &HeaderValue) -> Option<(String, String)> {
    let value = header.to_str().ok()?;
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user_id, password) = decoded.split_once(':')?;
    Some((user_id.to_string(), password.to_string()))
}
