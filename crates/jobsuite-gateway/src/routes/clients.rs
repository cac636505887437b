//! Client routes.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use serde::Deserialize;
use serde_json::Value;

use crate::auth::{bearer_token, contractor_id};
use crate::error::ApiError;
use crate::routes::estimates::MISSING_CONTRACTOR;
use crate::routes::items_response;
use crate::state::SharedState;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
}

pub async fn list(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Response, ApiError> {
    let token = bearer_token(&headers)?;
    let cid = contractor_id(&state, &headers, &token, MISSING_CONTRACTOR).await?;
    let body = state
        .backend
        .list_clients(&token, &cid, query.search.as_deref())
        .await
        .map_err(|e| ApiError::from_backend(&e, "An error occurred while fetching clients"))?;
    Ok(items_response(body))
}

pub async fn create(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let token = bearer_token(&headers)?;
    let cid = contractor_id(&state, &headers, &token, MISSING_CONTRACTOR).await?;
    let created = state
        .backend
        .create_client(&token, &cid, &body)
        .await
        .map_err(|e| ApiError::from_backend(&e, "An error occurred while creating the client"))?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let token = bearer_token(&headers)?;
    let cid = contractor_id(&state, &headers, &token, MISSING_CONTRACTOR).await?;
    let body = state
        .backend
        .get_client(&token, &cid, &id)
        .await
        .map_err(|e| ApiError::from_backend(&e, "An error occurred while fetching the client"))?;
    Ok(Json(body))
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
        .update_client(&token, &cid, &id, &body)
        .await
        .map_err(|e| ApiError::from_backend(&e, "An error occurred while updating the client"))?;
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
        .delete_client(&token, &cid, &id)
        .await
        .map_err(|e| ApiError::from_backend(&e, "An error occurred while deleting the client"))?;
    Ok(Json(deleted))
}
