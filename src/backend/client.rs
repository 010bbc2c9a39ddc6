//! Supabase REST client.
//!
//! # Responsibilities
//! - Build endpoint URLs from the configured project URL
//! - Attach the right key for each call (anon, service, or caller token)
//! - Return status and raw body untouched; interpretation is the browser's job

use axum::body::Bytes;
use axum::http::HeaderValue;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use url::Url;

use crate::backend::types::{BackendError, LoginRequest, UpstreamResponse};
use crate::config::BackendConfig;

const APIKEY: &str = "apikey";
const JSON: &str = "application/json";

/// Client for the Supabase auth, REST and edge-function endpoints.
pub struct BackendClient {
    http: reqwest::Client,
    base: Option<Url>,
    anon_key: String,
    service_key: String,
}

impl BackendClient {
    pub fn new(http: reqwest::Client, config: &BackendConfig) -> Self {
        let base = if config.url.is_empty() {
            None
        } else {
            Url::parse(&config.url).ok()
        };

        Self {
            http,
            base,
            anon_key: config.anon_key.clone(),
            service_key: config.service_key.clone(),
        }
    }

    /// Exchange email/password for a session (`grant_type=password`).
    ///
    /// Authenticated with the anon key: the caller has no token yet.
    pub async fn password_grant(
        &self,
        credentials: &LoginRequest,
    ) -> Result<UpstreamResponse, BackendError> {
        let mut url = self.endpoint(&["auth", "v1", "token"])?;
        url.query_pairs_mut().append_pair("grant_type", "password");

        let request = self
            .http
            .post(url)
            .header(APIKEY, &self.anon_key)
            .json(credentials);
        self.send(request).await
    }

    /// List the knowledge base, newest first.
    ///
    /// The outbound call carries the service key; the caller's token (if any)
    /// rides along in `Authorization` for row-level policies.
    pub async fn list_knowledge(&self, token: &str) -> Result<UpstreamResponse, BackendError> {
        let mut url = self.endpoint(&["rest", "v1", "knowledge_base"])?;
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("order", "created_at.desc");

        let mut request = self
            .http
            .get(url)
            .header(APIKEY, &self.service_key)
            .header(CONTENT_TYPE, JSON);
        if !token.is_empty() {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(request).await
    }

    /// Forward an upload body to the `knowledge-upload` edge function.
    ///
    /// `content_type` is passed through byte for byte so the multipart
    /// boundary survives.
    pub async fn upload_knowledge(
        &self,
        authorization: &str,
        content_type: Option<HeaderValue>,
        body: Bytes,
    ) -> Result<UpstreamResponse, BackendError> {
        let url = self.endpoint(&["functions", "v1", "knowledge-upload"])?;

        let mut request = self
            .http
            .post(url)
            .header(AUTHORIZATION, authorization)
            .body(body);
        if let Some(content_type) = content_type {
            request = request.header(CONTENT_TYPE, content_type);
        }
        self.send(request).await
    }

    pub async fn get_knowledge(
        &self,
        authorization: &str,
        id: &str,
    ) -> Result<UpstreamResponse, BackendError> {
        let url = self.knowledge_entry(id)?;
        let request = self
            .http
            .get(url)
            .header(AUTHORIZATION, authorization)
            .header(CONTENT_TYPE, JSON);
        self.send(request).await
    }

    pub async fn delete_knowledge(
        &self,
        authorization: &str,
        id: &str,
    ) -> Result<UpstreamResponse, BackendError> {
        let url = self.knowledge_entry(id)?;
        let request = self
            .http
            .delete(url)
            .header(AUTHORIZATION, authorization)
            .header(CONTENT_TYPE, JSON);
        self.send(request).await
    }

    fn knowledge_entry(&self, id: &str) -> Result<Url, BackendError> {
        self.endpoint(&["functions", "v1", "knowledge-base", id])
    }

    /// Append path segments to the project URL. Segments are percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, BackendError> {
        let mut url = self.base.clone().ok_or(BackendError::NotConfigured)?;
        url.path_segments_mut()
            .map_err(|_| BackendError::InvalidUrl)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<UpstreamResponse, BackendError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        Ok(UpstreamResponse { status, body })
    }
}
