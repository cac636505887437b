//! Direct-to-S3 upload flows.
//!
//! The gateway signs presigned POST policies so browsers and the CLI can
//! upload without AWS credentials; videos go through the backend-coordinated
//! multipart flow instead. Existence checks HEAD the bucket directly.

pub mod error;
pub mod head;
pub mod multipart;
pub mod presign;
pub mod single;

pub use error::UploadError;
pub use head::{object_exists, s3_store};
pub use multipart::{CHUNK_SIZE, MultipartTarget, upload_multipart};
pub use presign::{PostPolicySigner, UploadLimits};
pub use single::upload_presigned;
