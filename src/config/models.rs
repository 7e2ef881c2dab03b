//! Configuration data structures for the lingolens gateway.
//!
//! This module defines the schema for the application settings, including
//! server parameters and the upstream Gemini API connection.

use serde::{Deserialize, Serialize};

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings (host, port).
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream Gemini API settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The IP address or hostname the server should bind to.
    /// Default: `0.0.0.0`
    #[serde(default = "default_host")]
    pub host: String,

    /// The port number the server should listen on.
    /// Default: `8000`
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Settings for the upstream Gemini API connection.
///
/// The API key is an explicit configuration value injected into the client at
/// construction time rather than read from a process-wide global.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Base URL for Gemini's OpenAI-compatible API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// API key for the chat-completions endpoint.
    /// Falls back to the `GOOGLE_GEMINI_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: String,

    /// The Gemini model used for both extraction and translation.
    /// Default: `gemini-2.0-flash-exp`
    #[serde(default = "default_model")]
    pub model: String,

    /// Per-request timeout for outbound provider calls, in seconds.
    /// Default: `60`
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Maximum tokens the provider may generate per call.
    /// Default: `2048`
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default trait implementations linking to custom logic

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            api_key: String::new(),
            model: default_model(),
            timeout_seconds: default_timeout(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// Helper functions for serde defaults and shared constants
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_api_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta/openai".to_string()
}

fn default_model() -> String {
    "gemini-2.0-flash-exp".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_max_output_tokens() -> u32 {
    2048
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
