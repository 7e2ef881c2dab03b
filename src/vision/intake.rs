// Image validation and encoding for the provider call

use super::models::{validate_image_size, ImageFormat};
use crate::error::{GatewayError, Result};
use base64::Engine;

/// Validate an uploaded image and prepare it for the provider.
///
/// Returns the base64-encoded payload and its resolved MIME type. The declared
/// content type from the multipart part is trusted only when it names a
/// supported format; otherwise the bytes are sniffed.
pub fn prepare_image(data: &[u8], declared_mime: Option<&str>) -> Result<(String, String)> {
    if data.is_empty() {
        return Err(GatewayError::InvalidRequest(
            "Image file is required".to_string(),
        ));
    }

    validate_image_size(data.len()).map_err(GatewayError::InvalidRequest)?;

    let mime_type = declared_mime
        .and_then(ImageFormat::from_mime_type)
        .map(|format| format.mime_type().to_string())
        .or_else(|| detect_mime_type(data))
        .ok_or_else(|| {
            GatewayError::InvalidRequest("Unsupported or unrecognized image format".to_string())
        })?;

    let encoded = base64::engine::general_purpose::STANDARD.encode(data);

    Ok((encoded, mime_type))
}

/// Detect MIME type from magic bytes at start of image data
fn detect_mime_type(data: &[u8]) -> Option<String> {
    if data.len() < 12 {
        return None;
    }

    if data.starts_with(b"\xFF\xD8\xFF") {
        Some("image/jpeg".to_string())
    } else if data.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some("image/png".to_string())
    } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        Some("image/gif".to_string())
    } else if data.starts_with(b"RIFF") && data[8..12] == *b"WEBP" {
        Some("image/webp".to_string())
    } else if data[4..12] == *b"ftypheic" || data[4..12] == *b"ftypheix" {
        Some("image/heic".to_string())
    } else {
        None
    }
}
