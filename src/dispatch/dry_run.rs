//! Dispatcher that only logs. Useful for local development without a Crisp
//! plugin token.

use async_trait::async_trait;

use crate::dispatch::{DispatchError, Dispatcher, OutboundMessage};

pub struct DryRunDispatcher;

#[async_trait]
impl Dispatcher for DryRunDispatcher {
    async fn send(
        &self,
        website_id: &str,
        session_id: &str,
        message: &OutboundMessage,
    ) -> Result<(), DispatchError> {
        tracing::info!(
            website_id = %website_id,
            session_id = %session_id,
            content = %message.content,
            "Dry run: reply not sent"
        );
        Ok(())
    }
}
