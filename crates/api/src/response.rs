//! Shared response bodies for API handlers.
//!
//! Resource handlers define their own envelopes (`{ message, category }`,
//! `{ products }`, ...) next to the handler; the shapes used by more than
//! one module live here.

use serde::Serialize;

/// A bare `{ "message": ... }` body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}
