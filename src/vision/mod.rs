//! Image intake for the OCR path.
//!
//! Multipart uploads arrive as raw bytes with an unreliable (often absent)
//! content type. This module validates the payload, resolves a MIME type via
//! magic-byte sniffing when needed, and base64-encodes the bytes for the
//! data-URI sent to the provider.
//!
//! # Submodules
//!
//! - `models`: Supported formats and size limits.
//! - `intake`: Validation, sniffing, and encoding logic.

pub mod intake;
pub mod models;

pub use intake::prepare_image;
