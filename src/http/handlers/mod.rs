//! Route handlers.
//!
//! - auth.rs: `POST /api/auth/login`
//! - knowledge.rs: `/api/knowledge` list, upload, detail
//! - webhook.rs: `POST /crisp/message`

pub mod auth;
pub mod knowledge;
pub mod webhook;

use axum::http::StatusCode;

use crate::error::RelayError;

/// Fallback for routes that exist but not for this method.
pub async fn method_not_allowed() -> RelayError {
    RelayError::MethodNotAllowed
}

pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
