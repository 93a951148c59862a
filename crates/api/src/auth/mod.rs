//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- session token generation and validation.
//! - [`cookie`] -- the `authToken` cookie set on sign-in and cleared on logout.

pub mod cookie;
pub mod jwt;
pub mod password;
