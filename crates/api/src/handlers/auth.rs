//! Handlers for the `/auth` resource (signup, signin, change-password, logout).

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use catalog_core::credentials::{normalize_password, Credentials};
use catalog_core::error::CoreError;
use catalog_db::models::user::CreateUser;
use catalog_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::cookie::{expired_cookie, session_cookie};
use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::response::MessageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup` and `POST /auth/signin`.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request body for `POST /auth/change-password`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub email: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

/// Body returned by signup.
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: &'static str,
    pub token: String,
}

/// Body returned by signin.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Signin answers every credential failure identically.
fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Validation("Invalid credentials".into()))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/signup
///
/// Create a user and return a session token.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<CredentialsRequest>,
) -> AppResult<(StatusCode, Json<SignupResponse>)> {
    let creds = Credentials::from_parts(input.email.as_deref(), input.password.as_deref())
        .ok_or_else(|| AppError::Core(CoreError::Validation("Invalid Credentials".into())))?;

    if UserRepo::find_by_email(&state.pool, &creds.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict("User already exists".into())));
    }

    let password_hash = hash_password(&creds.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email: creds.email,
            password_hash,
        },
    )
    .await?;

    let token = generate_token(user.id, &user.email, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, "User signed up");

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User created successfully",
            token,
        }),
    ))
}

/// POST /api/auth/signin
///
/// Verify email + password. Returns the token in the body and in the
/// `authToken` cookie.
pub async fn signin(
    State(state): State<AppState>,
    Json(input): Json<CredentialsRequest>,
) -> AppResult<impl IntoResponse> {
    let creds = Credentials::from_parts(input.email.as_deref(), input.password.as_deref())
        .ok_or_else(invalid_credentials)?;

    let user = UserRepo::find_by_email(&state.pool, &creds.email)
        .await?
        .ok_or_else(invalid_credentials)?;

    let password_valid = verify_password(&creds.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        tracing::debug!(user_id = user.id, "Sign-in rejected: wrong password");
        return Err(invalid_credentials());
    }

    let token = generate_token(user.id, &user.email, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let cookie = session_cookie(&token, state.config.jwt.expiry_secs())
        .ok_or_else(|| AppError::InternalError("Token is not a valid cookie value".into()))?;

    tracing::info!(user_id = user.id, "User signed in");

    Ok(([(SET_COOKIE, cookie)], Json(TokenResponse { token })))
}

/// POST /api/auth/change-password
///
/// The current password is the credential: no session token is needed.
pub async fn change_password(
    State(state): State<AppState>,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let email = input
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::Core(CoreError::Validation("Email is required.".into())))?;

    let user = UserRepo::find_by_email(&state.pool, email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found with this email.".into()))?;

    let current_ok = match input.current_password.as_deref().and_then(normalize_password) {
        Some(current) => verify_password(&current, &user.password_hash).map_err(|e| {
            AppError::InternalError(format!("Password verification error: {e}"))
        })?,
        None => false,
    };
    if !current_ok {
        return Err(AppError::Core(CoreError::Validation(
            "Incorrect current password.".into(),
        )));
    }

    let new_password = input
        .new_password
        .as_deref()
        .and_then(normalize_password)
        .ok_or_else(|| AppError::Core(CoreError::required("New password")))?;

    let password_hash = hash_password(&new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    UserRepo::update_password(&state.pool, user.id, &password_hash).await?;

    tracing::info!(user_id = user.id, "Password changed");

    Ok(Json(MessageResponse::new("Password updated successfully.")))
}

/// POST /api/auth/logout
///
/// Expire the `authToken` cookie. Tokens are stateless, so nothing is revoked
/// server-side.
pub async fn logout() -> impl IntoResponse {
    (
        [(SET_COOKIE, expired_cookie())],
        Json(MessageResponse::new("Logout successful")),
    )
}
