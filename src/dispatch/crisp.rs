//! Crisp REST dispatcher.

use async_trait::async_trait;
use axum::http::StatusCode;
use url::Url;

use crate::config::CrispConfig;
use crate::dispatch::{DispatchError, Dispatcher, OutboundMessage};

const TIER_HEADER: &str = "X-Crisp-Tier";

/// Posts replies to `website/{website_id}/conversation/{session_id}/message`
/// with plugin-tier credentials (basic auth identifier:key plus tier header).
pub struct CrispDispatcher {
    http: reqwest::Client,
    api_url: String,
    identifier: String,
    key: String,
    tier: String,
}

impl CrispDispatcher {
    pub fn new(http: reqwest::Client, config: &CrispConfig) -> Self {
        Self {
            http,
            api_url: config.api_url.clone(),
            identifier: config.identifier.clone(),
            key: config.key.clone(),
            tier: config.tier.clone(),
        }
    }

    fn endpoint(&self, website_id: &str, session_id: &str) -> Result<Url, DispatchError> {
        let mut url = Url::parse(&self.api_url)
            .map_err(|e| DispatchError::InvalidEndpoint(format!("{}: {}", self.api_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| DispatchError::InvalidEndpoint(self.api_url.clone()))?
            .pop_if_empty()
            .extend(["website", website_id, "conversation", session_id, "message"]);
        Ok(url)
    }
}

#[async_trait]
impl Dispatcher for CrispDispatcher {
    async fn send(
        &self,
        website_id: &str,
        session_id: &str,
        message: &OutboundMessage,
    ) -> Result<(), DispatchError> {
        if self.identifier.is_empty() || self.key.is_empty() {
            return Err(DispatchError::MissingCredentials);
        }

        let url = self.endpoint(website_id, session_id)?;
        let response = self
            .http
            .post(url)
            .basic_auth(&self.identifier, Some(&self.key))
            .header(TIER_HEADER, &self.tier)
            .json(message)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::OK || status == StatusCode::CREATED {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(DispatchError::Rejected { status, body })
    }
}
