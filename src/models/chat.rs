// Gemini OpenAI-compatible chat-completions wire types
//
// The gateway talks to generativelanguage.googleapis.com/v1beta/openai, which
// accepts the OpenAI chat schema: plain-string content for text-only turns and
// typed content parts when an image is attached.

use serde::{Deserialize, Serialize};

/// Request body for `POST {base}/chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Opaque per-call correlation token. The provider uses it to group a
    /// call's internal turns; it carries no lifecycle beyond the single call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

/// A single chat turn.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String, // "user" or "system"
    pub content: MessageContent,
}

/// Message content: a bare string, or a list of typed parts for vision input.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

/// Individual content part of a multimodal message.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

/// Image reference; the gateway always sends a `data:` URI.
#[derive(Debug, Clone, Serialize)]
pub struct ImageUrl {
    pub url: String,
}

/// Response body of a successful chat-completions call.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// First choice's text content, or an empty string when the provider
    /// returned no usable content.
    pub fn into_text(self) -> String {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default()
    }
}
