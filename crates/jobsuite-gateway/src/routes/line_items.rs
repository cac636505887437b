//! Line item and change order routes.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use serde_json::Value;

use crate::auth::{bearer_token, contractor_id};
use crate::error::ApiError;
use crate::routes::estimates::MISSING_CONTRACTOR;
use crate::state::SharedState;

pub async fn list(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(estimate_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let token = bearer_token(&headers)?;
    let cid = contractor_id(&state, &headers, &token, MISSING_CONTRACTOR).await?;
    let body = state
        .backend
        .list_line_items(&token, &cid, &estimate_id)
        .await
        .map_err(|e| ApiError::from_backend(&e, "An error occurred while fetching line items"))?;
    Ok(Json(body))
}

pub async fn create(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(estimate_id): Path<String>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let token = bearer_token(&headers)?;
    let cid = contractor_id(&state, &headers, &token, MISSING_CONTRACTOR).await?;
    let created = state
        .backend
        .create_line_item(&token, &cid, &estimate_id, &body)
        .await
        .map_err(|e| {
            ApiError::from_backend(&e, "An error occurred while creating the line item")
        })?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path((estimate_id, line_item_id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let token = bearer_token(&headers)?;
    let cid = contractor_id(&state, &headers, &token, MISSING_CONTRACTOR).await?;
    let updated = state
        .backend
        .update_line_item(&token, &cid, &estimate_id, &line_item_id, &body)
        .await
        .map_err(|e| {
            ApiError::from_backend(&e, "An error occurred while updating the line item")
        })?;
    Ok(Json(updated))
}

pub async fn delete(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path((estimate_id, line_item_id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let token = bearer_token(&headers)?;
    let cid = contractor_id(&state, &headers, &token, MISSING_CONTRACTOR).await?;
    let deleted = state
        .backend
        .delete_line_item(&token, &cid, &estimate_id, &line_item_id)
        .await
        .map_err(|e| {
            ApiError::from_backend(&e, "An error occurred while deleting the line item")
        })?;
    Ok(Json(deleted))
}

pub async fn reorder(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(estimate_id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let token = bearer_token(&headers)?;
    let cid = contractor_id(&state, &headers, &token, MISSING_CONTRACTOR).await?;
    let reordered = state
        .backend
        .reorder_line_items(&token, &cid, &estimate_id, &body)
        .await
        .map_err(|e| {
            ApiError::from_backend(&e, "An error occurred while reordering line items")
        })?;
    Ok(Json(reordered))
}

pub async fn list_change_orders(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(estimate_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let token = bearer_token(&headers)?;
    let cid = contractor_id(&state, &headers, &token, MISSING_CONTRACTOR).await?;
    let body = state
        .backend
        .list_change_orders(&token, &cid, &estimate_id)
        .await
        .map_err(|e| {
            ApiError::from_backend(&e, "An error occurred while fetching change orders")
        })?;
    Ok(Json(body))
}

pub async fn create_change_order(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(estimate_id): Path<String>,
    body: Option<Json<Value>>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let token = bearer_token(&headers)?;
    let cid = contractor_id(&state, &headers, &token, MISSING_CONTRACTOR).await?;
    let payload = body.map(|Json(v)| v);
    let created = state
        .backend
        .create_change_order(&token, &cid, &estimate_id, payload.as_ref())
        .await
        .map_err(|e| {
            ApiError::from_backend(&e, "An error occurred while creating the change order")
        })?;
    Ok((StatusCode::CREATED, Json(created)))
}
