//! Route handlers, one module per resource.

use axum::Json;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use jobsuite_backend::ForwardedHeaders;
use serde_json::{Value, json};

pub mod clients;
pub mod comments;
pub mod estimates;
pub mod jira;
pub mod line_items;
pub mod misc;
pub mod outreach;
pub mod projects;
pub mod resources;
pub mod storage;

/// `{"Items": […]}` wrapping for list responses.
pub(crate) fn items_response(value: Value) -> Response {
    Json(json!({ "Items": value })).into_response()
}

/// A JSON response re-emitting the upstream's forwardable cache headers.
pub(crate) fn forwarded_response(
    status: StatusCode,
    forwarded: &ForwardedHeaders,
    body: Value,
) -> Response {
    let mut resp = (status, Json(body)).into_response();
    for (name, value) in forwarded.pairs() {
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name),
            HeaderValue::from_str(&value),
        ) {
            resp.headers_mut().insert(name, value);
        }
    }
    resp
}
