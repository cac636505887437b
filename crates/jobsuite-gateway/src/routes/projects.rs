//! Project routes. Projects are estimates that have moved into a job phase;
//! the upstream keeps them under `jobs`.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use jobsuite_backend::EstimateQuery;
use serde::Deserialize;
use serde_json::Value;

use crate::auth::{bearer_token, contractor_id};
use crate::error::ApiError;
use crate::routes::estimates::MISSING_CONTRACTOR;
use crate::routes::items_response;
use crate::state::SharedState;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub client_id: Option<String>,
    pub status: Option<String>,
}

pub async fn list(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Response, ApiError> {
    let token = bearer_token(&headers)?;
    let cid = contractor_id(&state, &headers, &token, MISSING_CONTRACTOR).await?;
    let query = EstimateQuery {
        client_id: query.client_id,
        status: query.status,
    };
    let body = state
        .backend
        .list_jobs(&token, &cid, &query)
        .await
        .map_err(|e| ApiError::from_backend(&e, "An error occurred while fetching projects"))?;
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
        .create_job(&token, &cid, &body)
        .await
        .map_err(|e| ApiError::from_backend(&e, "An error occurred while creating the project"))?;
    Ok((StatusCode::CREATED, Json(created)))
}
