//! Crisp webhook pipeline.
//!
//! # Data Flow
//! ```text
//! POST /crisp/message
//!     → http/handlers/webhook.rs (body read; non-POST answered 405 by the router)
//!     → event.rs (decode envelope)
//!     → WebhookPipeline::process
//!         from == user && type == text ?
//!             → responder.rs (reply text)
//!             → dispatch (exactly one send)
//!     → 200 OK "OK"
//! ```
//!
//! # Design Decisions
//! - Acknowledgement never depends on delivery; Crisp must not retry because
//!   our downstream call failed
//! - Dispatch errors are logged, not surfaced

pub mod event;
pub mod responder;

use std::sync::Arc;

use crate::dispatch::{Dispatcher, OutboundMessage};
use crate::observability::metrics;

pub use event::{Author, InboundEvent};
pub use responder::{Responder, TemplateResponder};

/// What happened to one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Not a user text message; nothing sent.
    Ignored,
    Replied,
    DispatchFailed,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Ignored => "ignored",
            Outcome::Replied => "replied",
            Outcome::DispatchFailed => "dispatch_failed",
        }
    }
}

pub struct WebhookPipeline {
    responder: Arc<dyn Responder>,
    dispatcher: Arc<dyn Dispatcher>,
}

impl WebhookPipeline {
    pub fn new(responder: Arc<dyn Responder>, dispatcher: Arc<dyn Dispatcher>) -> Self {
        Self {
            responder,
            dispatcher,
        }
    }

    /// Decide, reply and dispatch for a single event.
    pub async fn process(&self, event: &InboundEvent) -> Outcome {
        let outcome = self.reply_if_wanted(event).await;
        metrics::record_webhook_event(outcome.as_str());
        outcome
    }

    async fn reply_if_wanted(&self, event: &InboundEvent) -> Outcome {
        if !event.wants_reply() {
            tracing::debug!(
                event = %event.event,
                session_id = %event.session_id,
                from = ?event.from,
                message_type = %event.message_type,
                "Event ignored"
            );
            return Outcome::Ignored;
        }

        let content = event.text();
        tracing::info!(
            session_id = %event.session_id,
            content = %content,
            "User message"
        );

        let reply = self.responder.reply(&content).await;
        let message = OutboundMessage::operator_text(reply);

        match self
            .dispatcher
            .send(&event.website_id, &event.session_id, &message)
            .await
        {
            Ok(()) => {
                metrics::record_dispatch("ok");
                tracing::info!(
                    session_id = %event.session_id,
                    reply = %message.content,
                    "Reply sent"
                );
                Outcome::Replied
            }
            Err(e) => {
                metrics::record_dispatch("error");
                tracing::error!(
                    session_id = %event.session_id,
                    error = %e,
                    "Failed to send reply to Crisp"
                );
                Outcome::DispatchFailed
            }
        }
    }
}
