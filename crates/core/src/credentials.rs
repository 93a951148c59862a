//! Normalisation of email/password pairs submitted to the auth endpoints.
//!
//! The same trimming is applied when a password is hashed and when it is
//! verified, so surrounding whitespace never causes a sign-in mismatch.

use crate::error::CoreError;

/// A trimmed, non-empty email/password pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Build credentials from optional raw inputs.
    ///
    /// Returns `None` when either value is missing or blank after trimming.
    pub fn from_parts(email: Option<&str>, password: Option<&str>) -> Option<Self> {
        let email = non_blank(email)?;
        let password = normalize_password(password?)?;
        Some(Self { email, password })
    }
}

/// Trim a password. Blank passwords are rejected with `None`.
pub fn normalize_password(raw: &str) -> Option<String> {
    non_blank(Some(raw))
}

/// Require a non-blank field, returning it trimmed.
pub fn require_text(field: &str, raw: Option<&str>) -> Result<String, CoreError> {
    non_blank(raw).ok_or_else(|| CoreError::required(field))
}

fn non_blank(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
