// Gemini chat-completions client

use super::prompts;
use crate::config::GeminiConfig;
use crate::error::{GatewayError, Result};
use crate::models::chat::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ContentPart, ImageUrl,
    MessageContent,
};
use crate::utils::logging::sanitize;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};

/// Client for Gemini's OpenAI-compatible chat-completions API.
///
/// Both OCR extraction and translation go through the same endpoint; the only
/// structural difference is whether the user message carries an image part.
/// The API key is injected at construction, not read from a process global.
pub struct GeminiClient {
    http_client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a new client with connection pooling and an explicit timeout on
    /// every outbound call.
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(GatewayError::Config(
                "Gemini API key is not configured; set GOOGLE_GEMINI_API_KEY".to_string(),
            ));
        }

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .tcp_nodelay(true)
            .use_rustls_tls()
            .build()
            .map_err(|e| GatewayError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        debug!("Created HTTP client with connection pooling and keep-alive");

        Ok(Self {
            http_client,
            config: config.clone(),
        })
    }

    /// Extract text from a base64-encoded image via a single vision call.
    ///
    /// The extracted text may legitimately be empty (blank image); callers are
    /// expected to pass it on unmodified.
    pub async fn extract_text(
        &self,
        image_base64: &str,
        mime_type: &str,
        prompt: &str,
    ) -> Result<String> {
        debug!("Calling extraction for {} image", mime_type);

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: MessageContent::Text(prompts::OCR_SYSTEM_MESSAGE.to_string()),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: MessageContent::Parts(vec![
                        ContentPart::Text {
                            text: prompt.to_string(),
                        },
                        ContentPart::ImageUrl {
                            image_url: ImageUrl {
                                url: format!("data:{};base64,{}", mime_type, image_base64),
                            },
                        },
                    ]),
                },
            ],
            max_tokens: Some(self.config.max_output_tokens),
            temperature: Some(prompts::OCR_TEMPERATURE),
            user: Some(correlation_token("ocr")),
        };

        self.chat(request).await
    }

    /// Translate text to the target language via a single text call.
    pub async fn translate(&self, text: &str, target_language: &str) -> Result<String> {
        debug!("Calling translation to {}", target_language);

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: MessageContent::Text(prompts::TRANSLATION_SYSTEM_MESSAGE.to_string()),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: MessageContent::Text(prompts::translation_prompt(
                        target_language,
                        text,
                    )),
                },
            ],
            max_tokens: Some(self.config.max_output_tokens),
            temperature: Some(prompts::TRANSLATION_TEMPERATURE),
            user: Some(correlation_token("translate")),
        };

        self.chat(request).await
    }

    /// Check connectivity to the Gemini API.
    ///
    /// Sends a minimal one-token request to verify the endpoint is reachable
    /// and the API key is accepted.
    pub async fn check_connectivity(&self) -> Result<Duration> {
        let start = std::time::Instant::now();

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: MessageContent::Text("hi".to_string()),
            }],
            max_tokens: Some(1),
            temperature: None,
            user: Some(correlation_token("check")),
        };

        self.chat(request).await?;

        let latency = start.elapsed();
        debug!("API connectivity check passed in {:?}", latency);
        Ok(latency)
    }

    /// Issue one chat-completions call and return the first choice's text.
    ///
    /// No retry, no backoff: any upstream failure surfaces immediately with
    /// the provider's message attached, and the caller's HTTP response carries
    /// it as a 500.
    async fn chat(&self, request: ChatCompletionRequest) -> Result<String> {
        let url = format!("{}/chat/completions", self.config.api_base_url);

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| GatewayError::Provider(format!("HTTP error: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(
                "Gemini API error: HTTP {} - Response body: {}",
                status,
                sanitize(&error_text)
            );
            let message = Self::extract_error_message(&error_text)
                .unwrap_or_else(|| format!("API Error: {}", status));
            return Err(GatewayError::Provider(message));
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| GatewayError::Provider(format!("Failed to read response body: {}", e)))?;

        let chat_response: ChatCompletionResponse = serde_json::from_str(&response_text)
            .map_err(|e| {
                error!("Failed to parse Gemini response: {}", e);
                GatewayError::Provider(format!("Response parsing error: {}", e))
            })?;

        Ok(chat_response.into_text())
    }

    /// Extract error message from API response JSON
    fn extract_error_message(response_text: &str) -> Option<String> {
        #[derive(serde::Deserialize)]
        struct ErrorResponse {
            error: Option<ErrorDetail>,
        }

        #[derive(serde::Deserialize)]
        struct ErrorDetail {
            message: Option<String>,
            status: Option<String>,
        }

        if let Ok(error_resp) = serde_json::from_str::<ErrorResponse>(response_text) {
            if let Some(error) = error_resp.error {
                return error.message.or(error.status);
            }
        }
        None
    }
}

/// Random per-call correlation token passed in the request's `user` field.
fn correlation_token(kind: &str) -> String {
    format!("{}-{}", kind, uuid::Uuid::new_v4().simple())
}
