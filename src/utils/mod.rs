//! Cross-cutting utilities for the lingolens gateway.
//!
//! # Submodules
//!
//! - `logging`: Tracing initialization and API-key redaction for log output.

pub mod logging;
