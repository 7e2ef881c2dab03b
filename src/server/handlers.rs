// HTTP request handlers

use super::routes::AppState;
use crate::error::GatewayError;
use crate::gemini::prompts;
use crate::models::api::{
    default_target_language, HealthResponse, OcrTranslateResponse, TranslateRequest,
    TranslateResponse,
};
use crate::vision;
use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use tracing::{debug, error, info};

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: format!("lingolens gateway v{} is running", env!("CARGO_PKG_VERSION")),
    })
}

/// Fallback for unmapped paths.
pub async fn not_found_handler() -> GatewayError {
    GatewayError::NotFound("Endpoint not found".to_string())
}

/// Handler for `POST /ocr-translate`.
///
/// Two strictly sequential provider calls: extract text from the uploaded
/// image, then translate the result. The translation call depends on the
/// extraction output, so the steps cannot overlap. If the client disconnects,
/// axum drops this future and the in-flight provider call is cancelled with it.
pub async fn ocr_translate_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<OcrTranslateResponse>, GatewayError> {
    let mut image: Option<(Bytes, Option<String>)> = None;
    let mut target_language: Option<String> = None;
    let mut prompt: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        GatewayError::InvalidRequest(format!("Malformed multipart body: {}", e))
    })? {
        match field.name() {
            Some("image") => {
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await.map_err(|e| {
                    GatewayError::InvalidRequest(format!("Failed to read image field: {}", e))
                })?;
                image = Some((data, content_type));
            }
            Some("targetLanguage") => {
                target_language = Some(field.text().await.map_err(|e| {
                    GatewayError::InvalidRequest(format!("Failed to read targetLanguage: {}", e))
                })?);
            }
            Some("prompt") => {
                prompt = Some(field.text().await.map_err(|e| {
                    GatewayError::InvalidRequest(format!("Failed to read prompt: {}", e))
                })?);
            }
            _ => {}
        }
    }

    let (data, declared_mime) = image.ok_or_else(|| {
        GatewayError::InvalidRequest("Image file is required".to_string())
    })?;
    if data.is_empty() {
        return Err(GatewayError::InvalidRequest(
            "Image file is required".to_string(),
        ));
    }

    let target_language = target_language
        .filter(|lang| !lang.trim().is_empty())
        .unwrap_or_else(default_target_language);
    let prompt = prompt
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| prompts::DEFAULT_OCR_PROMPT.to_string());

    info!(
        "Received ocr-translate request: {} bytes, targetLanguage={}",
        data.len(),
        target_language
    );

    let (image_base64, mime_type) = vision::prepare_image(&data, declared_mime.as_deref())?;

    // Step 1: extract text from the image
    let extracted_text = state
        .gemini_client
        .extract_text(&image_base64, &mime_type, &prompt)
        .await
        .map_err(|e| {
            error!("Extraction call failed: {}", e);
            e
        })?;

    debug!("Extracted {} chars of text", extracted_text.len());

    // Step 2: translate the extracted text. Empty extractions are forwarded
    // as-is; what the provider returns for them is its own business.
    let translated_text = state
        .gemini_client
        .translate(&extracted_text, &target_language)
        .await
        .map_err(|e| {
            error!("Translation call failed: {}", e);
            e
        })?;

    Ok(Json(OcrTranslateResponse {
        success: true,
        extracted_text,
        translated_text,
        target_language,
    }))
}

/// Handler for `POST /translate`.
///
/// Single provider call with the shared translation prompt template.
pub async fn translate_handler(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<TranslateResponse>, GatewayError> {
    let req: TranslateRequest = serde_json::from_str(&body).map_err(|e| {
        GatewayError::InvalidRequest(format!("JSON deserialization error: {}", e))
    })?;

    let text = req
        .text
        .filter(|t| !t.is_empty())
        .ok_or_else(|| GatewayError::InvalidRequest("Text field is required".to_string()))?;

    info!(
        "Received translate request: {} chars, targetLanguage={}",
        text.len(),
        req.target_language
    );

    let translated_text = state
        .gemini_client
        .translate(&text, &req.target_language)
        .await
        .map_err(|e| {
            error!("Translation call failed: {}", e);
            e
        })?;

    Ok(Json(TranslateResponse {
        success: true,
        translated_text,
        target_language: req.target_language,
    }))
}
