use axum::{body::Bytes, extract::State, response::Response};

use crate::backend::LoginRequest;
use crate::error::RelayError;
use crate::http::response::relay;
use crate::http::server::AppState;

/// Password login, proxied to Supabase Auth with the anon key.
///
/// A rejected login comes back as whatever Supabase answered (400 with its
/// own error body), not as a relay error.
pub async fn login(State(state): State<AppState>, body: Bytes) -> Result<Response, RelayError> {
    let credentials: LoginRequest =
        serde_json::from_slice(&body).map_err(|_| RelayError::BadRequest("invalid request body"))?;

    let upstream = state
        .backend
        .password_grant(&credentials)
        .await
        .map_err(|e| RelayError::upstream("failed to connect to auth service", e))?;

    Ok(relay(upstream))
}
