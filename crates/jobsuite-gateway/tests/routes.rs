//! End-to-end route behavior against a mocked upstream.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use jobsuite_config::JobsuiteConfig;
use jobsuite_gateway::AppState;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tower::ServiceExt;

fn app(upstream_url: &str) -> Router {
    let state = AppState::with_backend_url(JobsuiteConfig::default(), upstream_url);
    jobsuite_gateway::router(Arc::new(state))
}

async fn body_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

fn authed(request: axum::http::request::Builder) -> axum::http::request::Builder {
    request
        .header(header::AUTHORIZATION, "Bearer tok-1")
        .header("x-contractor-id", "c-1")
}

#[tokio::test]
async fn missing_auth_is_rejected_before_any_upstream_call() {
    let mut server = mockito::Server::new_async().await;
    let upstream = server
        .mock("PUT", "/api/v1/contractors/c-1/clients/cl-1")
        .expect(0)
        .create_async()
        .await;

    let response = app(&server.url())
        .oneshot(
            Request::put("/api/clients/cl-1")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"name": "Acme"}"#))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["message"], "Authorization header missing or invalid");
    upstream.assert_async().await;
}

#[tokio::test]
async fn client_creation_answers_201_with_the_upstream_entity() {
    let mut server = mockito::Server::new_async().await;
    let upstream = server
        .mock("POST", "/api/v1/contractors/c-1/clients")
        .match_header("authorization", "Bearer tok-1")
        .with_status(201)
        .with_body(r#"{"id": "cl-9", "name": "Acme Painting"}"#)
        .create_async()
        .await;

    let response = app(&server.url())
        .oneshot(
            authed(Request::post("/api/clients"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"name": "Acme Painting"}"#))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["id"], "cl-9");
    upstream.assert_async().await;
}

#[tokio::test]
async fn client_list_forwards_search_and_wraps_in_items() {
    let mut server = mockito::Server::new_async().await;
    let upstream = server
        .mock("GET", "/api/v1/contractors/c-1/clients?search=Acme")
        .with_body(r#"[{"id": "cl-1", "name": "Acme Painting"}]"#)
        .create_async()
        .await;

    let response = app(&server.url())
        .oneshot(
            authed(Request::get("/api/clients?search=Acme"))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["Items"][0]["name"], "Acme Painting");
    upstream.assert_async().await;
}

#[tokio::test]
async fn estimate_collection_rejects_put_and_delete() {
    let server = mockito::Server::new_async().await;

    for request in [
        Request::put("/api/estimates")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .expect("request"),
        Request::delete("/api/estimates")
            .body(Body::empty())
            .expect("request"),
    ] {
        let response = app(&server.url()).oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
        let body = body_json(response.into_body()).await;
        assert!(
            body["message"]
                .as_str()
                .expect("message")
                .contains("not implemented")
        );
    }
}

#[tokio::test]
async fn estimate_list_forwards_cache_headers() {
    let mut server = mockito::Server::new_async().await;
    let upstream = server
        .mock("GET", "/api/v1/contractors/c-1/estimates")
        .with_header("x-cache-hit", "true")
        .with_header("x-backend-version", "1.4.2")
        .with_body(r#"[{"id": "e-1"}]"#)
        .create_async()
        .await;

    let response = app(&server.url())
        .oneshot(
            authed(Request::get("/api/estimates"))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-cache-hit").and_then(|v| v.to_str().ok()),
        Some("true")
    );
    assert_eq!(
        response
            .headers()
            .get("x-backend-version")
            .and_then(|v| v.to_str().ok()),
        Some("1.4.2")
    );
    let body = body_json(response.into_body()).await;
    assert_eq!(body["Items"][0]["id"], "e-1");
    upstream.assert_async().await;
}

#[tokio::test]
async fn comment_list_requires_an_estimate_id() {
    let server = mockito::Server::new_async().await;

    let response = app(&server.url())
        .oneshot(
            authed(Request::get("/api/job-comments"))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["message"], "estimate_id is required");
}

#[tokio::test]
async fn multipart_initiate_requires_every_form_field() {
    let server = mockito::Server::new_async().await;

    let boundary = "X-JOBSUITE-BOUNDARY";
    let form = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"filename\"\r\n\r\nwalkthrough.mp4\r\n--{boundary}--\r\n"
    );
    let response = app(&server.url())
        .oneshot(
            authed(Request::post("/api/estimates/e-1/resources/multipart/initiate"))
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(Body::from(form))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response.into_body()).await;
    assert_eq!(
        body["message"],
        "filename, content_type, and resource_type are required"
    );
}

#[tokio::test]
async fn multipart_complete_requires_a_parts_array() {
    let server = mockito::Server::new_async().await;

    let response = app(&server.url())
        .oneshot(
            authed(Request::post(
                "/api/estimates/e-1/resources/res-1/multipart/complete",
            ))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"parts": null}"#))
            .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["message"], "parts array is required");
}

#[tokio::test]
async fn reorder_route_wins_over_the_line_item_id_route() {
    let mut server = mockito::Server::new_async().await;
    let upstream = server
        .mock("PUT", "/api/v1/contractors/c-1/estimates/e-1/line-items/reorder")
        .match_body(mockito::Matcher::Json(json!({
            "line_item_ids": ["li-2", "li-1"]
        })))
        .with_body(r#"[{"id": "li-2"}, {"id": "li-1"}]"#)
        .create_async()
        .await;

    let response = app(&server.url())
        .oneshot(
            authed(Request::put("/api/estimates/e-1/line-items/reorder"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"line_item_ids": ["li-2", "li-1"]}"#))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    upstream.assert_async().await;
}

#[tokio::test]
async fn upstream_errors_keep_their_status_and_detail() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v1/contractors/c-1/estimates/e-404")
        .with_status(404)
        .with_body(r#"{"detail": "Estimate not found"}"#)
        .create_async()
        .await;

    let response = app(&server.url())
        .oneshot(
            authed(Request::get("/api/estimates/e-404"))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["message"], "Estimate not found");
}

#[tokio::test]
async fn jira_route_requires_job_and_client() {
    let server = mockito::Server::new_async().await;

    let response = app(&server.url())
        .oneshot(
            authed(Request::post("/api/jira"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"job": {"id": "e-1"}}"#))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["error"], "Job and client data are required");
}

#[tokio::test]
async fn log_sink_needs_no_auth_and_always_succeeds() {
    let server = mockito::Server::new_async().await;

    let response = app(&server.url())
        .oneshot(
            Request::post("/api/log")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"message": "render failed", "logStream": "web"}"#,
                ))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn contractor_id_is_resolved_through_users_me_when_absent() {
    let mut server = mockito::Server::new_async().await;
    let me = server
        .mock("GET", "/api/v1/users/me")
        .with_body(r#"{"id": "u-1", "contractor_id": "c-77"}"#)
        .create_async()
        .await;
    let upstream = server
        .mock("GET", "/api/v1/contractors/c-77/clients")
        .with_body("[]")
        .create_async()
        .await;

    let response = app(&server.url())
        .oneshot(
            Request::get("/api/clients")
                .header(header::AUTHORIZATION, "Bearer tok-1")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    me.assert_async().await;
    upstream.assert_async().await;
}
