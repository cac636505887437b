//! Cross-cutting error type for JobSuite.
//!
//! Domain-specific errors (`BackendError`, `CacheError`, `UploadError`,
//! `RenderError`) live in their respective crates; this one covers
//! validation of shared entity data.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed validation (format, enum value, required field).
    #[error("Validation error: {0}")]
    Validation(String),
}
