//! Outreach (follow-up) message routes. These routes report a missing
//! contractor id with a different message than the rest of the gateway.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use jobsuite_backend::OutreachQuery;
use serde::Deserialize;
use serde_json::Value;

use crate::auth::{bearer_token, contractor_id};
use crate::error::ApiError;
use crate::state::SharedState;

pub(crate) const MISSING_CONTRACTOR: &str = "Contractor ID not found";

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub estimate_id: Option<String>,
    pub status: Option<String>,
    pub due_before: Option<String>,
}

pub async fn list(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Json<Value>, ApiError> {
    let token = bearer_token(&headers)?;
    let cid = contractor_id(&state, &headers, &token, MISSING_CONTRACTOR).await?;
    let query = OutreachQuery {
        estimate_id: query.estimate_id,
        status: query.status,
        due_before: query.due_before,
    };
    let body = state
        .backend
        .list_outreach_messages(&token, &cid, &query)
        .await
        .map_err(|e| {
            ApiError::from_backend(&e, "An error occurred while fetching outreach messages")
        })?;
    Ok(Json(body))
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
        .create_outreach_message(&token, &cid, &body)
        .await
        .map_err(|e| {
            ApiError::from_backend(&e, "An error occurred while creating the outreach message")
        })?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn send(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(message_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let token = bearer_token(&headers)?;
    let cid = contractor_id(&state, &headers, &token, MISSING_CONTRACTOR).await?;
    let sent = state
        .backend
        .send_outreach_message(&token, &cid, &message_id)
        .await
        .map_err(|e| {
            ApiError::from_backend(&e, "An error occurred while sending the outreach message")
        })?;
    Ok(Json(sent))
}
