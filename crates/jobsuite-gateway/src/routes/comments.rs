//! Job comment routes. The collection route takes the estimate id as a
//! query parameter on GET and as a body field on POST.

use axum::Json;
use axum::extract::{Query, State};
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
    pub estimate_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateBody {
    pub estimate_id: Option<String>,
    pub comment_contents: Option<String>,
}

pub async fn list(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Response, ApiError> {
    let token = bearer_token(&headers)?;
    let Some(estimate_id) = query.estimate_id else {
        return Err(ApiError::message(
            StatusCode::BAD_REQUEST,
            "estimate_id is required",
        ));
    };
    let cid = contractor_id(&state, &headers, &token, MISSING_CONTRACTOR).await?;
    let body = state
        .backend
        .list_comments(&token, &cid, &estimate_id)
        .await
        .map_err(|e| ApiError::from_backend(&e, "An error occurred while fetching comments"))?;
    Ok(items_response(body))
}

pub async fn create(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<CreateBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let token = bearer_token(&headers)?;
    let (Some(estimate_id), Some(comment_contents)) = (body.estimate_id, body.comment_contents)
    else {
        return Err(ApiError::message(
            StatusCode::BAD_REQUEST,
            "estimate_id and comment_contents are required",
        ));
    };
    let cid = contractor_id(&state, &headers, &token, MISSING_CONTRACTOR).await?;
    let created = state
        .backend
        .create_comment(&token, &cid, &estimate_id, &comment_contents)
        .await
        .map_err(|e| ApiError::from_backend(&e, "An error occurred while creating the comment"))?;
    Ok((StatusCode::CREATED, Json(created)))
}
