//! Multipart video upload orchestration.
//!
//! Fixed 5 MiB chunks, parts numbered from 1, uploaded strictly in order.
//! Any failure after initiate aborts the backend session best-effort; the
//! original error always wins.

use jobsuite_backend::BackendClient;
use jobsuite_core::responses::{CompleteMultipartRequest, CompletedPart};
use serde_json::Value;

use crate::error::UploadError;

pub const CHUNK_SIZE: usize = 5 * 1024 * 1024;

/// Everything needed to address one multipart session.
#[derive(Debug, Clone)]
pub struct MultipartTarget<'a> {
    pub token: &'a str,
    pub contractor_id: &'a str,
    pub estimate_id: &'a str,
}

/// Progress callback, invoked after each part with (parts done, parts total).
pub type ProgressFn<'a> = dyn Fn(usize, usize) + Send + Sync + 'a;

/// Upload `bytes` as a multipart video resource.
///
/// Initiates the session (spaces in `filename` become underscores), PUTs
/// each chunk to its per-part presigned URL without a Content-Type header,
/// collects the ETags, and completes the session. Returns the resource
/// record from the completion call.
///
/// # Errors
///
/// Returns [`UploadError`] on any step failing. After initiate, failures
/// abort the backend session best-effort before returning.
pub async fn upload_multipart(
    backend: &BackendClient,
    http: &reqwest::Client,
    target: &MultipartTarget<'_>,
    filename: &str,
    content_type: &str,
    bytes: &[u8],
    progress: Option<&ProgressFn<'_>>,
) -> Result<Value, UploadError> {
    let safe_name = filename.replace(' ', "_");
    let resource = backend
        .initiate_multipart(
            target.token,
            target.contractor_id,
            target.estimate_id,
            &safe_name,
            content_type,
            "VIDEO",
        )
        .await?;
    let resource_id = resource
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            UploadError::InvalidResponse("initiate response did not include a resource id".into())
        })?
        .to_string();

    match upload_parts(backend, http, target, &resource_id, bytes, progress).await {
        Ok(parts) => {
            let completed = backend
                .complete_multipart(
                    target.token,
                    target.contractor_id,
                    target.estimate_id,
                    &resource_id,
                    &CompleteMultipartRequest { parts },
                )
                .await?;
            tracing::info!(resource_id, "multipart upload completed");
            Ok(completed)
        }
        Err(error) => {
            abort_best_effort(backend, target, &resource_id).await;
            Err(error)
        }
    }
}

async fn upload_parts(
    backend: &BackendClient,
    http: &reqwest::Client,
    target: &MultipartTarget<'_>,
    resource_id: &str,
    bytes: &[u8],
    progress: Option<&ProgressFn<'_>>,
) -> Result<Vec<CompletedPart>, UploadError> {
    // A zero-byte file still uploads one (empty) part so completion works.
    let total = bytes.len().div_ceil(CHUNK_SIZE).max(1);
    let mut parts = Vec::with_capacity(total);

    for index in 0..total {
        let part_number = u32::try_from(index + 1)
            .map_err(|_| UploadError::InvalidResponse("part count overflow".into()))?;
        let chunk = &bytes[index * CHUNK_SIZE..bytes.len().min((index + 1) * CHUNK_SIZE)];
        let presign = backend
            .multipart_part_url(
                target.token,
                target.contractor_id,
                target.estimate_id,
                resource_id,
                part_number,
            )
            .await?;

        let etag = put_part(http, &presign.presigned_url, part_number, chunk).await?;
        parts.push(CompletedPart { part_number, etag });
        if let Some(progress) = progress {
            progress(parts.len(), total);
        }
    }

    Ok(parts)
}

/// PUT one chunk. No Content-Type header; S3 signed the part URL without one.
async fn put_part(
    http: &reqwest::Client,
    url: &str,
    part_number: u32,
    chunk: &[u8],
) -> Result<String, UploadError> {
    let resp = http.put(url).body(chunk.to_vec()).send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(UploadError::StorageStatus {
            status: status.as_u16(),
        });
    }

    let etag = resp
        .headers()
        .get(reqwest::header::ETAG)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim_matches('"').to_string())
        .filter(|v| !v.is_empty())
        .ok_or(UploadError::MissingEtag { part_number })?;
    tracing::debug!(part_number, etag, "part stored");
    Ok(etag)
}

async fn abort_best_effort(
    backend: &BackendClient,
    target: &MultipartTarget<'_>,
    resource_id: &str,
) {
    if let Err(error) = backend
        .abort_multipart(
            target.token,
            target.contractor_id,
            target.estimate_id,
            resource_id,
        )
        .await
    {
        tracing::warn!(resource_id, %error, "failed to abort multipart upload");
    } else {
        tracing::info!(resource_id, "multipart upload aborted");
    }
}
