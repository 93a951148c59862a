//! The `authToken` cookie.
//!
//! Sign-in sets it alongside the token in the response body; logout expires
//! it. The auth extractor accepts it as an alternative to a Bearer header.

use axum::http::header::COOKIE;
use axum::http::{HeaderMap, HeaderValue};

/// Name of the session cookie.
pub const AUTH_COOKIE: &str = "authToken";

/// `Set-Cookie` value carrying a fresh session token.
pub fn session_cookie(token: &str, max_age_secs: i64) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!(
        "{AUTH_COOKIE}={token}; HttpOnly; Path=/; SameSite=Lax; Max-Age={max_age_secs}"
    ))
    .ok()
}

/// `Set-Cookie` value that expires the session cookie immediately.
pub fn expired_cookie() -> HeaderValue {
    HeaderValue::from_static("authToken=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0")
}

/// Read the session token from the request's `Cookie` headers, if present.
pub fn token_from_cookies(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == AUTH_COOKIE && !value.is_empty())
        .map(|(_, value)| value)
}
