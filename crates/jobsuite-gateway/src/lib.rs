//! # jobsuite-gateway
//!
//! The local HTTP gateway. It authenticates requests with the caller's
//! bearer token, resolves the contractor id, and forwards to the upstream
//! API, plus a few routes it serves itself: presigned POST policies, the S3
//! existence probe, Jira ticket creation, and the client log sink.

mod auth;
mod error;
mod routes;
mod state;

pub use error::ApiError;
pub use state::{AppState, SharedState};

use axum::Router;
use axum::routing::{get, post, put};
use tracing::info;

/// Build the full route table over shared state.
#[must_use]
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route(
            "/api/estimates",
            get(routes::estimates::list)
                .post(routes::estimates::create)
                .put(routes::estimates::not_implemented)
                .delete(routes::estimates::not_implemented),
        )
        .route(
            "/api/estimates/{id}",
            get(routes::estimates::get)
                .put(routes::estimates::update)
                .delete(routes::estimates::delete),
        )
        .route("/api/estimates/{id}/details", get(routes::estimates::details))
        .route(
            "/api/estimates/{id}/line-items",
            get(routes::line_items::list).post(routes::line_items::create),
        )
        // Static segment first so "reorder" never binds as a line item id.
        .route(
            "/api/estimates/{id}/line-items/reorder",
            put(routes::line_items::reorder),
        )
        .route(
            "/api/estimates/{id}/line-items/{line_item_id}",
            put(routes::line_items::update).delete(routes::line_items::delete),
        )
        .route(
            "/api/estimates/{id}/change-orders",
            get(routes::line_items::list_change_orders)
                .post(routes::line_items::create_change_order),
        )
        .route(
            "/api/estimates/{id}/resources/multipart/initiate",
            post(routes::resources::initiate),
        )
        .route(
            "/api/estimates/{id}/resources/{rid}/multipart/presigned-url",
            get(routes::resources::part_url),
        )
        .route(
            "/api/estimates/{id}/resources/{rid}/multipart/complete",
            post(routes::resources::complete),
        )
        .route(
            "/api/estimates/{id}/resources/{rid}/multipart/abort",
            post(routes::resources::abort),
        )
        .route(
            "/api/estimates/{id}/resources/{rid}/presigned-url",
            get(routes::resources::read_url),
        )
        .route("/api/send_estimate", post(routes::estimates::send_estimate))
        .route(
            "/api/clients",
            get(routes::clients::list).post(routes::clients::create),
        )
        .route(
            "/api/clients/{id}",
            get(routes::clients::get)
                .put(routes::clients::update)
                .delete(routes::clients::delete),
        )
        .route(
            "/api/projects",
            get(routes::projects::list).post(routes::projects::create),
        )
        .route(
            "/api/job-comments",
            get(routes::comments::list).post(routes::comments::create),
        )
        .route(
            "/api/outreach-messages",
            get(routes::outreach::list).post(routes::outreach::create),
        )
        .route("/api/outreach-messages/{id}/send", post(routes::outreach::send))
        .route("/api/homepage", get(routes::misc::homepage))
        .route("/api/s3", post(routes::storage::exists))
        .route("/api/images", post(routes::storage::presign_image))
        .route("/api/videos", post(routes::storage::presign_video))
        .route("/api/jira", post(routes::jira::create_ticket))
        .route("/api/log", post(routes::misc::log))
        .with_state(state)
}

/// Bind the configured listen address and serve until shutdown.
///
/// # Errors
///
/// Returns an IO error when the listener cannot bind or the server fails.
pub async fn serve(state: SharedState) -> std::io::Result<()> {
    let addr = state.config.gateway.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, backend = %state.backend.base_url(), "gateway listening");
    axum::serve(listener, router(state)).await
}
