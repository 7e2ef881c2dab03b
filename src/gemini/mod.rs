// Gemini API client module

mod client;
pub mod prompts;

pub use client::GeminiClient;
