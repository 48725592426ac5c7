//! OpenAI chat-completions wire types shared by all modules

use serde::{Deserialize, Serialize};

/// Incoming `POST /chat/completions` body
///
/// Only the fields the gateway acts on are modelled; anything else the
/// client sends is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<MessageContent>,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: Some(MessageContent::Text(content.into())),
        }
    }

    /// Plain text of the message
    ///
    /// Array content contributes its text parts joined by newlines;
    /// non-text parts (images, audio) are skipped.
    pub fn text(&self) -> String {
        match &self.content {
            None => String::new(),
            Some(MessageContent::Text(text)) => text.clone(),
            Some(MessageContent::Parts(parts)) => parts
                .iter()
                .filter(|part| part.kind == "text")
                .filter_map(|part| part.text.as_deref())
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// Message content is either a bare string or an array of typed parts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentPart {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// One `chat.completion.chunk` SSE payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionChunk {
    pub id: String,
    pub object: String,
    pub created: u64,
    pub model: String,
    pub choices: Vec<ChunkChoice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkChoice {
    pub index: u32,
    pub delta: ChunkDelta,
    /// Serialized as `null` until the final chunk
    pub finish_reason: Option<String>,
}

/// Incremental message delta; an all-`None` delta serializes as `{}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkDelta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_string_and_part_content() {
        let body = r#"{"model": "m", "messages": [
            {"role": "system", "content": "be brief"},
            {"role": "user", "content": [{"type": "text", "text": "a cat"}, {"type": "image_url", "image_url": {"url": "x"}}, {"type": "text", "text": "in space"}]},
            {"role": "assistant", "content": null}
        ], "stream": true}"#;

        let request: ChatRequest = serde_json::from_str(body).unwrap();

        assert_eq!(request.stream, Some(true));
        assert_eq!(request.messages[0].text(), "be brief");
        assert_eq!(request.messages[1].text(), "a cat\nin space");
        assert_eq!(request.messages[2].text(), "");
    }

    #[test]
    fn missing_fields_default() {
        let request: ChatRequest = serde_json::from_str("{}").unwrap();
        assert!(request.model.is_empty());
        assert!(request.messages.is_empty());
    }

    #[test]
    fn empty_delta_serializes_as_object() {
        let choice = ChunkChoice {
            index: 0,
            delta: ChunkDelta::default(),
            finish_reason: None,
        };
        let value = serde_json::to_value(choice).unwrap();
        assert_eq!(value["delta"], serde_json::json!({}));
        assert!(value["finish_reason"].is_null());
        assert!(value.as_object().unwrap().contains_key("finish_reason"));
    }
}
