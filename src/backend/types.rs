//! Supabase request/response shapes.

use axum::body::Bytes;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Browser login payload, forwarded as the password-grant body.
///
/// Missing fields are forwarded empty; Supabase decides what that means.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// A response that made it back from the backend, whatever its status.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

/// Failures to get any response at all from the backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("backend URL is not configured")]
    NotConfigured,

    #[error("backend URL cannot be used as a base")]
    InvalidUrl,

    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),
}
