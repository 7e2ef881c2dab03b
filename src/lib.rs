// lingolens - Gemini-backed OCR and translation HTTP gateway

pub mod cli;
pub mod config;
pub mod error;
pub mod gemini;
pub mod models;
pub mod server;
pub mod utils;
pub mod vision;
