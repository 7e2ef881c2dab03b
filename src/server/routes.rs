// HTTP routes configuration

use super::handlers::{health_handler, not_found_handler, ocr_translate_handler, translate_handler};
use super::middleware::request_id_layers;
use crate::config::AppConfig;
use crate::error::Result;
use crate::gemini::GeminiClient;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub gemini_client: Arc<GeminiClient>,
}

pub fn create_router(config: AppConfig, gemini_client: GeminiClient) -> Result<Router> {
    let state = AppState {
        config,
        gemini_client: Arc::new(gemini_client),
    };

    let (set_request_id, propagate_request_id) = request_id_layers();

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/ocr-translate", post(ocr_translate_handler))
        .route("/translate", post(translate_handler))
        .fallback(not_found_handler)
        // Allow large request bodies for image uploads: the provider accepts
        // up to 20MB decoded, so leave headroom for multipart overhead
        .layer(DefaultBodyLimit::max(25 * 1024 * 1024))
        .layer(tower_http::limit::RequestBodyLimitLayer::new(25 * 1024 * 1024))
        // Browser clients upload images directly
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state);

    Ok(app)
}
