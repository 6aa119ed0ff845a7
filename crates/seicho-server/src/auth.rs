//! Bearer-token authentication for the progression API
//!
//! Seicho is a single-user deployment: one shared key, loaded from the
//! SEICHO_API_KEY secret at startup, guards every /dashboard route. When
//! no key is configured the middleware lets requests through so local
//! runs work without secrets.

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};

/// Shared key, set once at startup
static API_KEY: std::sync::OnceLock<String> = std::sync::OnceLock::new();

/// Store the key for the lifetime of the process. Later calls are ignored.
pub fn init_api_key(key: String) {
    let _ = API_KEY.set(key);
}

/// The configured key; an empty key counts as unconfigured
fn configured_key() -> Option<&'static str> {
    API_KEY
        .get()
        .map(String::as_str)
        .filter(|key| !key.is_empty())
}

/// True when the Authorization header carries exactly the expected
/// bearer token
fn token_matches(auth_header: Option<&str>, expected: &str) -> bool {
    auth_header
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|token| token == expected)
}

/// Reject requests whose bearer token does not match the configured key
pub async fn auth_middleware(request: Request, next: Next) -> Result<Response, StatusCode> {
    let Some(expected) = configured_key() else {
        tracing::warn!("SEICHO_API_KEY not configured, requests are unauthenticated");
        return Ok(next.run(request).await);
    };

    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    if token_matches(auth_header, expected) {
        Ok(next.run(request).await)
    } else {
        tracing::warn!("Rejected request with missing or invalid bearer token");
        Err(StatusCode::UNAUTHORIZED)
    }
}
