//! Relaying backend responses.
//!
//! Status and body go back to the browser exactly as Supabase sent them; the
//! only thing the relay adds is `Content-Type: application/json`.

use axum::{
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};

use crate::backend::UpstreamResponse;

pub fn relay(upstream: UpstreamResponse) -> Response {
    (
        upstream.status,
        [(CONTENT_TYPE, "application/json")],
        upstream.body,
    )
        .into_response()
}
