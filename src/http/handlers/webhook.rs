use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::Request,
};

use crate::error::RelayError;
use crate::http::server::AppState;
use crate::webhook::InboundEvent;

/// `POST /crisp/message`.
///
/// Answers `200 OK` as soon as the event decodes, whether or not a reply was
/// sent.
pub async fn crisp_message(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Result<&'static str, RelayError> {
    let body = to_bytes(request.into_body(), state.config.security.max_body_size)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Error reading webhook body");
            RelayError::BadRequest("error reading body")
        })?;

    let event = InboundEvent::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "Error parsing webhook JSON");
        RelayError::BadRequest("error parsing JSON")
    })?;

    tracing::info!(
        event = %event.event,
        website_id = %event.website_id,
        session_id = %event.session_id,
        "Received webhook"
    );

    state.pipeline.process(&event).await;
    Ok("OK")
}
