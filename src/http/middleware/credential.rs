//! Bearer credential gate.
//!
//! Structural check only: the token is never decoded or verified here.
//! Supabase validates it when the proxied call lands.

use axum::{
    body::Body,
    http::{header::AUTHORIZATION, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::RelayError;

/// Caller's bearer token, attached to the request by [`require_bearer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
}

impl Credential {
    /// Parse `Bearer <token>`: exactly two space-separated parts, the first
    /// being `Bearer`, the second non-empty.
    pub fn parse(header: &str) -> Option<Self> {
        let parts: Vec<&str> = header.split(' ').collect();
        match parts.as_slice() {
            ["Bearer", token] if !token.is_empty() => Some(Self {
                token: (*token).to_string(),
            }),
            _ => None,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// The `Authorization` value to forward. Equal to the header the caller
    /// sent, since only the canonical form parses.
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Reject requests without a well-formed `Authorization: Bearer <token>`.
pub async fn require_bearer(mut req: Request<Body>, next: Next) -> Response {
    let header = match req.headers().get(AUTHORIZATION) {
        Some(value) if !value.is_empty() => value,
        _ => return RelayError::Unauthorized("missing authorization header").into_response(),
    };

    let credential = match header.to_str().ok().and_then(Credential::parse) {
        Some(c) => c,
        None => {
            return RelayError::Unauthorized("invalid authorization header format")
                .into_response()
        }
    };

    req.extensions_mut().insert(credential);
    next.run(req).await
}

/// Token for routes where authentication is optional: the second part of a
/// two-part `Authorization` header, or empty.
pub fn optional_bearer(headers: &HeaderMap) -> String {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| {
            let parts: Vec<&str> = v.split(' ').collect();
            match parts.as_slice() {
                [_, token] => Some((*token).to_string()),
                _ => None,
            }
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::to_bytes, http::StatusCode, middleware, routing::get, Extension, Router};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route(
                "/protected",
                get(|Extension(c): Extension<Credential>| async move { c.token().to_string() }),
            )
            .route_layer(middleware::from_fn(require_bearer))
    }

    async fn call(auth: Option<&str>) -> (StatusCode, String) {
        let mut builder = Request::builder().uri("/protected");
        if let Some(auth) = auth {
            builder = builder.header(AUTHORIZATION, auth);
        }
        let res = app()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = res.status();
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        let (status, body) = call(None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("missing authorization header"));
    }

    #[tokio::test]
    async fn test_malformed_headers_are_unauthorized() {
        for header in ["Token abc", "Bearer", "Bearer ", "Bearer a b", "bearer abc", "Bearer  abc"] {
            let (status, body) = call(Some(header)).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "header {:?}", header);
            assert!(body.contains("invalid authorization header format"));
        }
    }

    #[tokio::test]
    async fn test_well_formed_bearer_passes_through() {
        let (status, body) = call(Some("Bearer xyz")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "xyz");
    }

    #[test]
    fn test_authorization_round_trips() {
        let c = Credential::parse("Bearer eyJhbGciOi.abc.def").unwrap();
        assert_eq!(c.authorization(), "Bearer eyJhbGciOi.abc.def");
    }

    #[test]
    fn test_optional_bearer() {
        let mut headers = HeaderMap::new();
        assert_eq!(optional_bearer(&headers), "");

        headers.insert(AUTHORIZATION, "Bearer tok".parse().unwrap());
        assert_eq!(optional_bearer(&headers), "tok");

        headers.insert(AUTHORIZATION, "garbage".parse().unwrap());
        assert_eq!(optional_bearer(&headers), "");
    }
}
