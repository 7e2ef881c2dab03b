//! Axum-based HTTP server for the lingolens gateway.
//!
//! This module sets up the HTTP surface: a health probe, the combined
//! OCR-plus-translation endpoint, and the plain translation endpoint. Each
//! handler is a single linear pipeline that delegates the actual work to the
//! Gemini client.
//!
//! # Components
//!
//! - `handlers`: Implementation of the individual endpoints.
//! - `middleware`: Request ID layers shared by the router.
//! - `routes`: The router configuration that ties everything together.

mod handlers;
mod middleware;
mod routes;

pub use routes::{create_router, AppState};
