//! Estimate routes.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use jobsuite_backend::EstimateQuery;
use serde::Deserialize;
use serde_json::Value;

use crate::auth::{bearer_token, contractor_id};
use crate::error::ApiError;
use crate::routes::forwarded_response;
use crate::state::SharedState;

pub const MISSING_CONTRACTOR: &str = "User does not have a contractor ID";

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub client_id: Option<String>,
    pub status: Option<String>,
}

impl From<ListQuery> for EstimateQuery {
    fn from(query: ListQuery) -> Self {
        Self {
            client_id: query.client_id,
            status: query.status,
        }
    }
}

pub async fn list(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Response, ApiError> {
    let token = bearer_token(&headers)?;
    let cid = contractor_id(&state, &headers, &token, MISSING_CONTRACTOR).await?;
    let (body, fwd) = state
        .backend
        .list_estimates(&token, &cid, &query.into())
        .await
        .map_err(|e| ApiError::from_backend(&e, "An error occurred while fetching estimates"))?;
    Ok(forwarded_response(
        StatusCode::OK,
        &fwd,
        serde_json::json!({ "Items": body }),
    ))
}

pub async fn create(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Response, ApiError> {
    let token = bearer_token(&headers)?;
    let cid = contractor_id(&state, &headers, &token, MISSING_CONTRACTOR).await?;
    let (created, fwd) = state
        .backend
        .create_estimate(&token, &cid, &body)
        .await
        .map_err(|e| ApiError::from_backend(&e, "An error occurred while creating the estimate"))?;
    Ok(forwarded_response(StatusCode::CREATED, &fwd, created))
}

/// Collection-level PUT/DELETE are not part of the API surface.
pub async fn not_implemented() -> ApiError {
    ApiError::message(
        StatusCode::NOT_IMPLEMENTED,
        "Method not implemented; operate on /api/estimates/{id}",
    )
}

pub async fn get(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let token = bearer_token(&headers)?;
    let cid = contractor_id(&state, &headers, &token, MISSING_CONTRACTOR).await?;
    let (body, fwd) = state
        .backend
        .get_estimate(&token, &cid, &id)
        .await
        .map_err(|e| ApiError::from_backend(&e, "An error occurred while fetching the estimate"))?;
    Ok(forwarded_response(StatusCode::OK, &fwd, body))
}

pub async fn update(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let token = bearer_token(&headers)?;
    let cid = contractor_id(&state, &headers, &token, MISSING_CONTRACTOR).await?;
    let updated = state
        .backend
        .update_estimate(&token, &cid, &id, &body)
        .await
        .map_err(|e| ApiError::from_backend(&e, "An error occurred while updating the estimate"))?;
    Ok(Json(updated))
}

pub async fn delete(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let token = bearer_token(&headers)?;
    let cid = contractor_id(&state, &headers, &token, MISSING_CONTRACTOR).await?;
    let deleted = state
        .backend
        .delete_estimate(&token, &cid, &id)
        .await
        .map_err(|e| ApiError::from_backend(&e, "An error occurred while deleting the estimate"))?;
    Ok(Json(deleted))
}

pub async fn details(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let token = bearer_token(&headers)?;
    let cid = contractor_id(&state, &headers, &token, MISSING_CONTRACTOR).await?;
    let body = state
        .backend
        .estimate_details(&token, &cid, &id)
        .await
        .map_err(|e| {
            ApiError::from_backend(&e, "An error occurred while fetching estimate details")
        })?;
    Ok(Json(body))
}

#[derive(Debug, Deserialize)]
pub struct SendEstimateBody {
    pub estimate_id: String,
    #[serde(default)]
    pub client_emails: Vec<String>,
    #[serde(default)]
    pub signature_urls: Vec<String>,
}

/// Kick off the signed-estimate email send. This route reports failures on
/// the `error` key.
pub async fn send_estimate(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<SendEstimateBody>,
) -> Result<Json<Value>, ApiError> {
    let token = bearer_token(&headers)?;
    let cid = contractor_id(&state, &headers, &token, MISSING_CONTRACTOR).await?;
    let payload = serde_json::json!({
        "client_emails": body.client_emails,
        "signature_urls": body.signature_urls,
    });
    let sent = state
        .backend
        .send_estimate_email(&token, &cid, &body.estimate_id, &payload)
        .await
        .map_err(|e| {
            ApiError::from_backend_error_key(&e, "An error occurred while sending the estimate")
        })?;
    Ok(Json(sent))
}
