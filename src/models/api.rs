// Gateway request/response schemas

use serde::{Deserialize, Serialize};

/// Language used when a request omits `targetLanguage`.
pub const DEFAULT_TARGET_LANGUAGE: &str = "English";

pub fn default_target_language() -> String {
    DEFAULT_TARGET_LANGUAGE.to_string()
}

/// Body of `POST /translate`.
///
/// `text` is deserialized as optional so a missing field can be reported as a
/// 400 with a useful message instead of a serde error.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    pub text: Option<String>,

    #[serde(default = "default_target_language")]
    pub target_language: String,
}

/// Successful response of `POST /translate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    pub success: bool,
    pub translated_text: String,
    pub target_language: String,
}

/// Successful response of `POST /ocr-translate`.
///
/// `extracted_text` is only present on this combined path; the plain
/// translation endpoint returns [`TranslateResponse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrTranslateResponse {
    pub success: bool,
    pub extracted_text: String,
    pub translated_text: String,
    pub target_language: String,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}
