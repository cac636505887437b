//! Backend client error types.

use thiserror::Error;

/// Errors from calls against the upstream REST API or Jira.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned upstream.
        status: u16,
        /// Best-effort `detail`/`message` extraction, else the raw body or a
        /// caller-supplied fallback.
        message: String,
    },

    /// A response body did not match the expected shape.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The authenticated user has no contractor id.
    #[error("User does not have a contractor ID")]
    MissingContractorId,
}

impl BackendError {
    /// Upstream status code, when this error carries one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
