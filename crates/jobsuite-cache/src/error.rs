//! Cache error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    /// Snapshot file I/O failure.
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot (de)serialization failure.
    #[error("cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A background or manual fetch failed.
    #[error("fetch failed: {0}")]
    Fetch(String),
}
