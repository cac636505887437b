//! Single-object upload against a presigned POST policy.

use jobsuite_core::responses::PresignedPost;
use reqwest::multipart::{Form, Part};

use crate::error::UploadError;

/// POST `bytes` to the policy URL as a multipart form.
///
/// Every policy field is appended ahead of the file part, in policy order.
/// S3 answers 204 on success; any 2xx is accepted.
///
/// # Errors
///
/// Returns [`UploadError::StorageStatus`] on a non-success response and
/// [`UploadError::Http`] on transport failure.
pub async fn upload_presigned(
    http: &reqwest::Client,
    post: &PresignedPost,
    file_name: &str,
    content_type: &str,
    bytes: Vec<u8>,
) -> Result<(), UploadError> {
    let mut form = Form::new();
    for (name, value) in &post.fields {
        form = form.text(name.clone(), value.clone());
    }
    let part = Part::bytes(bytes)
        .file_name(file_name.to_string())
        .mime_str(content_type)?;
    form = form.part("file", part);

    let resp = http.post(&post.url).multipart(form).send().await?;
    let status = resp.status();
    if status.is_success() {
        tracing::debug!(url = %post.url, %status, "presigned POST accepted");
        Ok(())
    } else {
        Err(UploadError::StorageStatus {
            status: status.as_u16(),
        })
    }
}
