//! Reply generation.

use async_trait::async_trait;

const CONTENT_PLACEHOLDER: &str = "{content}";

/// Produces the reply text for a user message.
///
/// Async so that a model-backed implementation can slot in without touching
/// the pipeline.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn reply(&self, content: &str) -> String;
}

/// Echoes the user's message inside a fixed template.
pub struct TemplateResponder {
    template: String,
}

impl TemplateResponder {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }
}

#[async_trait]
impl Responder for TemplateResponder {
    async fn reply(&self, content: &str) -> String {
        self.template.replace(CONTENT_PLACEHOLDER, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::DEFAULT_REPLY_TEMPLATE;

    #[tokio::test]
    async fn test_default_template_echoes_input() {
        let responder = TemplateResponder::new(DEFAULT_REPLY_TEMPLATE);
        let reply = responder.reply("你好").await;
        assert!(reply.starts_with("您说：你好\n\n"));
        assert_eq!(reply, responder.reply("你好").await);
    }

    #[tokio::test]
    async fn test_content_is_not_reexpanded() {
        let responder = TemplateResponder::new("> {content}");
        assert_eq!(responder.reply("{content}").await, "> {content}");
    }
}
