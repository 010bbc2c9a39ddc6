//! Relay-local failures and their HTTP mapping.
//!
//! Responses received from Supabase are never errors here: they are relayed
//! as-is by the handlers. Only failures that happen inside the relay produce
//! a synthesized `{"error": "..."}` body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::backend::BackendError;

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("{0}")]
    BadRequest(&'static str),

    #[error("{0}")]
    Unauthorized(&'static str),

    /// The backend could not be reached (or the call could not be built).
    #[error("{context}: {source}")]
    Upstream {
        context: &'static str,
        #[source]
        source: BackendError,
    },
}

impl RelayError {
    pub fn upstream(context: &'static str, source: BackendError) -> Self {
        RelayError::Upstream { context, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            RelayError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            RelayError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let message = match &self {
            RelayError::Upstream { context, source } => {
                tracing::error!(error = %source, "{}", context);
                context.to_string()
            }
            other => {
                tracing::debug!(error = %other, "Rejecting request");
                other.to_string()
            }
        };

        (self.status(), Json(json!({ "error": message }))).into_response()
    }
}
