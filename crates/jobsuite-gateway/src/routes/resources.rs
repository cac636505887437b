//! Resource upload coordination routes. The gateway validates the request
//! shape and forwards multipart session calls to the upstream; the part PUTs
//! themselves go straight to object storage.

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use jobsuite_core::responses::CompleteMultipartRequest;
use serde::Deserialize;
use serde_json::Value;

use crate::auth::{bearer_token, contractor_id};
use crate::error::ApiError;
use crate::routes::estimates::MISSING_CONTRACTOR;
use crate::state::SharedState;

#[derive(Debug, Default, Deserialize)]
pub struct PartQuery {
    pub part_number: Option<u32>,
}

pub async fn initiate(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(estimate_id): Path<String>,
    mut form: Multipart,
) -> Result<Json<Value>, ApiError> {
    let token = bearer_token(&headers)?;

    let mut filename = None;
    let mut content_type = None;
    let mut resource_type = None;
    while let Some(field) = form.next_field().await.map_err(|_| {
        ApiError::message(StatusCode::BAD_REQUEST, "Invalid multipart form data")
    })? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let text = field.text().await.map_err(|_| {
            ApiError::message(StatusCode::BAD_REQUEST, "Invalid multipart form data")
        })?;
        match name.as_str() {
            "filename" => filename = Some(text),
            "content_type" => content_type = Some(text),
            "resource_type" => resource_type = Some(text),
            _ => {}
        }
    }
    let (Some(filename), Some(content_type), Some(resource_type)) =
        (filename, content_type, resource_type)
    else {
        return Err(ApiError::message(
            StatusCode::BAD_REQUEST,
            "filename, content_type, and resource_type are required",
        ));
    };

    let cid = contractor_id(&state, &headers, &token, MISSING_CONTRACTOR).await?;
    let resource = state
        .backend
        .initiate_multipart(
            &token,
            &cid,
            &estimate_id,
            &filename,
            &content_type,
            &resource_type,
        )
        .await
        .map_err(|e| {
            ApiError::from_backend(&e, "An error occurred while initiating the upload")
        })?;
    Ok(Json(resource))
}

pub async fn part_url(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path((estimate_id, resource_id)): Path<(String, String)>,
    Query(query): Query<PartQuery>,
) -> Result<Json<Value>, ApiError> {
    let token = bearer_token(&headers)?;
    let Some(part_number) = query.part_number else {
        return Err(ApiError::message(
            StatusCode::BAD_REQUEST,
            "part_number is required",
        ));
    };
    let cid = contractor_id(&state, &headers, &token, MISSING_CONTRACTOR).await?;
    let resp = state
        .backend
        .multipart_part_url(&token, &cid, &estimate_id, &resource_id, part_number)
        .await
        .map_err(|e| {
            ApiError::from_backend(&e, "An error occurred while fetching the presigned URL")
        })?;
    Ok(Json(serde_json::json!({ "presigned_url": resp.presigned_url })))
}

pub async fn complete(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path((estimate_id, resource_id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let token = bearer_token(&headers)?;
    if !body.get("parts").is_some_and(Value::is_array) {
        return Err(ApiError::message(
            StatusCode::BAD_REQUEST,
            "parts array is required",
        ));
    }
    let parts: CompleteMultipartRequest = serde_json::from_value(body).map_err(|_| {
        ApiError::message(StatusCode::BAD_REQUEST, "parts array is required")
    })?;
    let cid = contractor_id(&state, &headers, &token, MISSING_CONTRACTOR).await?;
    let resource = state
        .backend
        .complete_multipart(&token, &cid, &estimate_id, &resource_id, &parts)
        .await
        .map_err(|e| {
            ApiError::from_backend(&e, "An error occurred while completing the upload")
        })?;
    Ok(Json(resource))
}

pub async fn abort(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path((estimate_id, resource_id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let token = bearer_token(&headers)?;
    let cid = contractor_id(&state, &headers, &token, MISSING_CONTRACTOR).await?;
    let body = state
        .backend
        .abort_multipart(&token, &cid, &estimate_id, &resource_id)
        .await
        .map_err(|e| {
            ApiError::from_backend(&e, "An error occurred while aborting the upload")
        })?;
    Ok(Json(body))
}

pub async fn read_url(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path((estimate_id, resource_id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let token = bearer_token(&headers)?;
    let cid = contractor_id(&state, &headers, &token, MISSING_CONTRACTOR).await?;
    let body = state
        .backend
        .resource_presigned_url(&token, &cid, &estimate_id, &resource_id)
        .await
        .map_err(|e| {
            ApiError::from_backend(&e, "An error occurred while fetching the presigned URL")
        })?;
    Ok(Json(body))
}
