// End-to-end handler tests with a mocked provider

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use lingolens::config::AppConfig;
use lingolens::gemini::GeminiClient;
use lingolens::server::create_router;
use mockito::Matcher;
use serde_json::Value;
use tower::ServiceExt;

// Tiny 1x1 PNG
const PNG_BYTES: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0xDA, 0x63, 0x64,
    0xF8, 0xCF, 0x50, 0x0F, 0x00, 0x03, 0x86, 0x01, 0x80, 0x5A, 0x34, 0x7D, 0x6B, 0x00, 0x00,
    0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

const BOUNDARY: &str = "lingolens-test-boundary";

fn test_router(provider_base_url: &str) -> Router {
    let mut config = AppConfig::default();
    config.gemini.api_base_url = provider_base_url.to_string();
    config.gemini.api_key = "test-key".to_string();
    let client = GeminiClient::new(&config.gemini).expect("client");
    create_router(config, client).expect("router")
}

fn provider_reply(content: &str) -> String {
    serde_json::json!({
        "choices": [{
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop",
        }]
    })
    .to_string()
}

fn multipart_body(image: Option<&[u8]>, target_language: Option<&str>) -> Vec<u8> {
    let mut body = Vec::new();
    if let Some(data) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; \
                 filename=\"test.png\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    if let Some(lang) = target_language {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; \
                 name=\"targetLanguage\"\r\n\r\n{lang}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_health_returns_ok() {
    let app = test_router("http://127.0.0.1:9");

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["message"].as_str().unwrap().contains("running"));
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let app = test_router("http://127.0.0.1:9");

    let request = Request::builder()
        .method("POST")
        .uri("/no-such-endpoint")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Endpoint not found");
}

#[tokio::test]
async fn test_translate_missing_text_is_400() {
    let app = test_router("http://127.0.0.1:9");

    let request = Request::builder()
        .method("POST")
        .uri("/translate")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"targetLanguage": "Hindi"}"#))
        .unwrap();
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(message.to_lowercase().contains("required"), "{}", message);
}

#[tokio::test]
async fn test_translate_empty_text_is_400() {
    let app = test_router("http://127.0.0.1:9");

    let request = Request::builder()
        .method("POST")
        .uri("/translate")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"text": "", "targetLanguage": "Hindi"}"#))
        .unwrap();
    let (status, _) = send(app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_translate_defaults_to_english() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Regex("Translate the following text to English".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(provider_reply("Hello World"))
        .create_async()
        .await;

    let app = test_router(&server.url());
    let request = Request::builder()
        .method("POST")
        .uri("/translate")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"text": "Hello World"}"#))
        .unwrap();
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["translatedText"], "Hello World");
    assert_eq!(body["targetLanguage"], "English");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_translate_echoes_target_language() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Regex("Translate the following text to Hindi".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(provider_reply("नमस्ते दुनिया"))
        .create_async()
        .await;

    let app = test_router(&server.url());
    let request = Request::builder()
        .method("POST")
        .uri("/translate")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"text": "Hello World", "targetLanguage": "Hindi"}"#))
        .unwrap();
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["translatedText"], "नमस्ते दुनिया");
    assert_eq!(body["targetLanguage"], "Hindi");
}

#[tokio::test]
async fn test_translate_provider_failure_is_500_with_message() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(429)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": {"code": 429, "message": "Quota exceeded"}}"#)
        .create_async()
        .await;

    let app = test_router(&server.url());
    let request = Request::builder()
        .method("POST")
        .uri("/translate")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"text": "Hello World"}"#))
        .unwrap();
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["type"], "provider_error");
    assert!(body["error"].as_str().unwrap().contains("Quota exceeded"));
}

#[tokio::test]
async fn test_ocr_translate_missing_image_is_400() {
    let app = test_router("http://127.0.0.1:9");

    let request = Request::builder()
        .method("POST")
        .uri("/ocr-translate")
        .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(multipart_body(None, Some("English"))))
        .unwrap();
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(message.to_lowercase().contains("required"), "{}", message);
}

#[tokio::test]
async fn test_ocr_translate_empty_image_is_400() {
    let app = test_router("http://127.0.0.1:9");

    let request = Request::builder()
        .method("POST")
        .uri("/ocr-translate")
        .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(multipart_body(Some(&[]), Some("English"))))
        .unwrap();
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("required"));
}

#[tokio::test]
async fn test_ocr_translate_unrecognized_bytes_is_400() {
    let app = test_router("http://127.0.0.1:9");

    let request = Request::builder()
        .method("POST")
        .uri("/ocr-translate")
        .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(multipart_body(
            Some(b"this is plainly not an image"),
            Some("English"),
        )))
        .unwrap();
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Unsupported"));
}

#[tokio::test]
async fn test_ocr_translate_happy_path() {
    let mut server = mockito::Server::new_async().await;

    // First call carries the image part, second carries the extracted text
    let ocr_mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Regex("image_url".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(provider_reply("Hello World"))
        .create_async()
        .await;
    let translate_mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Regex("Text to translate".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(provider_reply("नमस्ते दुनिया"))
        .create_async()
        .await;

    let app = test_router(&server.url());
    let request = Request::builder()
        .method("POST")
        .uri("/ocr-translate")
        .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(multipart_body(Some(PNG_BYTES), Some("Hindi"))))
        .unwrap();
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["extractedText"], "Hello World");
    assert_eq!(body["translatedText"], "नमस्ते दुनिया");
    assert_eq!(body["targetLanguage"], "Hindi");
    ocr_mock.assert_async().await;
    translate_mock.assert_async().await;
}

#[tokio::test]
async fn test_ocr_translate_defaults_target_language() {
    let mut server = mockito::Server::new_async().await;
    let _ocr = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Regex("image_url".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(provider_reply("नमस्ते"))
        .create_async()
        .await;
    let translate = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Regex("Translate the following text to English".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(provider_reply("Hello"))
        .create_async()
        .await;

    let app = test_router(&server.url());
    let request = Request::builder()
        .method("POST")
        .uri("/ocr-translate")
        .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(multipart_body(Some(PNG_BYTES), None)))
        .unwrap();
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["targetLanguage"], "English");
    translate.assert_async().await;
}

#[tokio::test]
async fn test_ocr_translate_forwards_empty_extraction() {
    // Blank image: extraction comes back empty, and the translation call is
    // still made with the empty text rather than short-circuiting.
    let mut server = mockito::Server::new_async().await;
    let _ocr = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Regex("image_url".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(provider_reply(""))
        .create_async()
        .await;
    let translate = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Regex("Text to translate".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(provider_reply(""))
        .create_async()
        .await;

    let app = test_router(&server.url());
    let request = Request::builder()
        .method("POST")
        .uri("/ocr-translate")
        .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(multipart_body(Some(PNG_BYTES), Some("English"))))
        .unwrap();
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["extractedText"], "");
    translate.assert_async().await;
}

#[tokio::test]
async fn test_ocr_translate_provider_failure_is_500() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(503)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": {"message": "model overloaded"}}"#)
        .create_async()
        .await;

    let app = test_router(&server.url());
    let request = Request::builder()
        .method("POST")
        .uri("/ocr-translate")
        .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(multipart_body(Some(PNG_BYTES), Some("English"))))
        .unwrap();
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("model overloaded"));
}
