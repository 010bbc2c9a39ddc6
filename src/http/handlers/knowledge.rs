//! Knowledge base proxy handlers.

use axum::{
    body::{to_bytes, Body},
    extract::{Path, State},
    http::{header::CONTENT_TYPE, HeaderMap, Method, Request},
    response::Response,
    Extension,
};

use crate::error::RelayError;
use crate::http::middleware::{optional_bearer, Credential};
use crate::http::response::relay;
use crate::http::server::AppState;

/// `GET /api/knowledge`. The caller's token is optional here.
pub async fn list(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, RelayError> {
    let token = optional_bearer(&headers);

    let upstream = state
        .backend
        .list_knowledge(&token)
        .await
        .map_err(|e| RelayError::upstream("failed to fetch knowledge base", e))?;

    Ok(relay(upstream))
}

/// `POST /api/knowledge/upload`. Body and `Content-Type` go through
/// untouched so multipart boundaries stay valid.
pub async fn upload(
    State(state): State<AppState>,
    Extension(credential): Extension<Credential>,
    request: Request<Body>,
) -> Result<Response, RelayError> {
    let content_type = request.headers().get(CONTENT_TYPE).cloned();

    let body = to_bytes(request.into_body(), state.config.security.max_body_size)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Failed to read upload body");
            RelayError::BadRequest("failed to read request body")
        })?;

    tracing::debug!(bytes = body.len(), content_type = ?content_type, "Forwarding upload");

    let upstream = state
        .backend
        .upload_knowledge(&credential.authorization(), content_type, body)
        .await
        .map_err(|e| RelayError::upstream("failed to upload", e))?;

    Ok(relay(upstream))
}

/// `GET|DELETE /api/knowledge/{id}`.
pub async fn detail(
    State(state): State<AppState>,
    Extension(credential): Extension<Credential>,
    method: Method,
    Path(id): Path<String>,
) -> Result<Response, RelayError> {
    forward_entry(&state, &credential, &method, &id).await
}

/// `/api/knowledge/` with nothing after the slash.
pub async fn missing_id() -> RelayError {
    RelayError::BadRequest("missing knowledge id")
}

async fn forward_entry(
    state: &AppState,
    credential: &Credential,
    method: &Method,
    id: &str,
) -> Result<Response, RelayError> {
    if id.is_empty() {
        return Err(RelayError::BadRequest("missing knowledge id"));
    }

    let authorization = credential.authorization();

    let result = match *method {
        Method::GET => state.backend.get_knowledge(&authorization, id).await,
        Method::DELETE => state.backend.delete_knowledge(&authorization, id).await,
        _ => return Err(RelayError::MethodNotAllowed),
    };

    let upstream = result.map_err(|e| RelayError::upstream("failed to process request", e))?;

    Ok(relay(upstream))
}
