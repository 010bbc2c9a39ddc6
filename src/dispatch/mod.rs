//! Outbound reply delivery.
//!
//! # Data Flow
//! ```text
//! webhook pipeline
//!     → Dispatcher::send(website_id, session_id, OutboundMessage)
//!     → crisp.rs (REST call, plugin-tier auth)   mode = "crisp"
//!     → dry_run.rs (log only)                    mode = "dry_run"
//! ```
//!
//! # Design Decisions
//! - Single attempt per call; the caller only logs failures
//! - Implementation chosen once from config and shared behind `Arc<dyn Dispatcher>`

pub mod crisp;
pub mod dry_run;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use serde::Serialize;

use crate::config::{CrispConfig, DispatchMode};

pub use crisp::CrispDispatcher;
pub use dry_run::DryRunDispatcher;

/// A reply posted into a conversation as the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub from: &'static str,
    pub origin: &'static str,
    pub content: String,
}

impl OutboundMessage {
    pub fn operator_text(content: impl Into<String>) -> Self {
        Self {
            kind: "text",
            from: "operator",
            origin: "chat",
            content: content.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("crisp credentials are not configured")]
    MissingCredentials,

    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("crisp returned {status}: {body}")]
    Rejected { status: StatusCode, body: String },
}

/// Delivers a message into a chat conversation.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    async fn send(
        &self,
        website_id: &str,
        session_id: &str,
        message: &OutboundMessage,
    ) -> Result<(), DispatchError>;
}

/// Build the dispatcher selected by `crisp.mode`.
pub fn from_config(http: reqwest::Client, config: &CrispConfig) -> Arc<dyn Dispatcher> {
    match config.mode {
        DispatchMode::Crisp => Arc::new(CrispDispatcher::new(http, config)),
        DispatchMode::DryRun => Arc::new(DryRunDispatcher),
    }
}
