//! Crisp webhook envelope decoding.
//!
//! Wire shape: `{"event": "...", "data": {"website_id", "session_id",
//! "content", "from", "type"}}`. Missing or null fields decode to empty
//! values; only malformed JSON (or a wrongly typed field) is rejected.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Who wrote the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    User,
    Operator,
    #[default]
    #[serde(other)]
    Unspecified,
}

/// A decoded webhook event, consumed once by the pipeline.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InboundEvent {
    pub event: String,
    pub website_id: String,
    pub session_id: String,
    /// Text for `type == "text"`; an object for file/animation messages.
    pub content: Value,
    pub from: Author,
    pub message_type: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Envelope {
    #[serde(deserialize_with = "nullable")]
    event: String,
    #[serde(deserialize_with = "nullable")]
    data: EventData,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct EventData {
    #[serde(deserialize_with = "nullable")]
    website_id: String,
    #[serde(deserialize_with = "nullable")]
    session_id: String,
    content: Value,
    #[serde(deserialize_with = "nullable")]
    from: Author,
    #[serde(rename = "type", deserialize_with = "nullable")]
    message_type: String,
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl InboundEvent {
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        let envelope: Envelope = serde_json::from_slice(body)?;
        let data = envelope.data;
        Ok(Self {
            event: envelope.event,
            website_id: data.website_id,
            session_id: data.session_id,
            content: data.content,
            from: data.from,
            message_type: data.message_type,
        })
    }

    /// Only user-authored text messages get a reply.
    pub fn wants_reply(&self) -> bool {
        self.from == Author::User && self.message_type == "text"
    }

    pub fn text(&self) -> String {
        match &self.content {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}
