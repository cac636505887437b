//! Direct-to-S3 routes: the existence probe and the presigned POST policies
//! for image and video uploads. These use the server's own AWS credentials,
//! so they report failures under the `error` key instead of `message`.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use jobsuite_uploads::{PostPolicySigner, UploadLimits, object_exists, s3_store};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::error;

use crate::auth::bearer_token;
use crate::error::ApiError;
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct ExistsBody {
    #[serde(rename = "bucketName")]
    pub bucket_name: String,
    #[serde(rename = "objectKey")]
    pub object_key: String,
}

#[derive(Debug, Deserialize)]
pub struct PresignBody {
    pub filename: String,
    #[serde(rename = "contentType")]
    pub content_type: String,
    #[serde(rename = "jobID")]
    pub job_id: String,
}

pub async fn exists(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<ExistsBody>,
) -> Result<Json<Value>, ApiError> {
    bearer_token(&headers)?;
    let production = state.config.backend.is_production();
    let region = state.config.aws.resolved_region(production);
    let store = s3_store(
        &body.bucket_name,
        &region,
        &state.config.aws.access_key_id,
        &state.config.aws.secret_access_key,
    )
    .map_err(|e| {
        error!(error = %e, bucket = %body.bucket_name, "failed to build object store");
        ApiError::error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal error while checking S3 object",
        )
    })?;
    let present = object_exists(&store, &body.object_key).await.map_err(|e| {
        error!(error = %e, key = %body.object_key, "object existence check failed");
        ApiError::error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal error while checking S3 object",
        )
    })?;
    Ok(Json(json!({ "exists": present })))
}

pub async fn presign_image(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<PresignBody>,
) -> Result<Json<Value>, ApiError> {
    bearer_token(&headers)?;
    let production = state.config.backend.is_production();
    let bucket = if state.config.aws.image_bucket.is_empty() {
        jobsuite_config::AwsConfig::default_image_bucket(production)
    } else {
        state.config.aws.image_bucket.clone()
    };
    presign(&state, &bucket, &body, UploadLimits::IMAGE)
}

pub async fn presign_video(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<PresignBody>,
) -> Result<Json<Value>, ApiError> {
    bearer_token(&headers)?;
    let bucket = state.config.aws.video_bucket.clone();
    presign(&state, &bucket, &body, UploadLimits::VIDEO)
}

fn presign(
    state: &SharedState,
    bucket: &str,
    body: &PresignBody,
    limits: UploadLimits,
) -> Result<Json<Value>, ApiError> {
    let production = state.config.backend.is_production();
    let signer = PostPolicySigner::from_config(&state.config.aws, production)
        .map_err(|e| ApiError::error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    let key = format!("{}/{}", body.job_id, body.filename);
    let post = signer
        .presign(bucket, &key, &body.content_type, limits)
        .map_err(|e| ApiError::error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let fields: serde_json::Map<String, Value> = post
        .fields
        .into_iter()
        .map(|(name, value)| (name, Value::String(value)))
        .collect();
    Ok(Json(json!({ "url": post.url, "fields": fields })))
}
