//! Request extractors that gate access to handlers.
//!
//! - [`auth::AuthUser`] -- Extracts the signed-in user from a session token.

pub mod auth;
