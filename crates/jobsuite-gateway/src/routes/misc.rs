//! Homepage data passthrough and the client-side log sink.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use jobsuite_core::responses::LogEvent;
use serde_json::{Value, json};
use tracing::info;

use crate::auth::{bearer_token, contractor_id};
use crate::error::ApiError;
use crate::routes::estimates::MISSING_CONTRACTOR;
use crate::state::SharedState;

pub async fn homepage(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let token = bearer_token(&headers)?;
    let cid = contractor_id(&state, &headers, &token, MISSING_CONTRACTOR).await?;
    let body = state
        .backend
        .homepage_data(&token, &cid)
        .await
        .map_err(|e| {
            ApiError::from_backend(&e, "An error occurred while fetching homepage data")
        })?;
    Ok(Json(body))
}

/// Accept a client log line and emit it as a tracing event. Always answers
/// 200 so a broken logger never breaks the caller. No auth.
pub async fn log(Json(event): Json<LogEvent>) -> Json<Value> {
    info!(
        stream = event.log_stream.as_deref().unwrap_or("client"),
        message = %event.message,
        "client log"
    );
    Json(json!({ "status": "ok" }))
}
