//! Upload error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    /// Transport failure talking to storage or the backend.
    #[error("upload HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend call (initiate, presign, complete, abort, metadata) failed.
    #[error(transparent)]
    Backend(#[from] jobsuite_backend::BackendError),

    /// Storage answered a part or form POST with a non-success status.
    #[error("storage rejected the upload: status {status}")]
    StorageStatus { status: u16 },

    /// A part PUT came back without an ETag header. The bucket's CORS
    /// configuration must expose the `ETag` header, or completion is
    /// impossible.
    #[error(
        "part {part_number} response had no ETag header; check the bucket CORS ExposeHeaders configuration"
    )]
    MissingEtag { part_number: u32 },

    /// Local file I/O failure.
    #[error("upload I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// AWS credentials are not configured.
    #[error("AWS credentials are not configured: {0}")]
    MissingCredentials(String),

    /// The backend answered with a shape the flow cannot use.
    #[error("unexpected backend response: {0}")]
    InvalidResponse(String),

    /// Object-storage operation failed.
    #[error("object storage error: {0}")]
    Storage(#[from] object_store::Error),
}
