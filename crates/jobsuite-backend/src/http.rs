//! Shared HTTP response helpers for the backend client.
//!
//! Centralizes status-code checks (non-success → [`BackendError::Api`] with
//! best-effort `detail`/`message` extraction) so resource modules stay
//! focused on request construction and response mapping.

use crate::error::BackendError;

/// Response headers the gateway forwards to its own callers when present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForwardedHeaders {
    pub cache_hit: Option<String>,
    pub backend_version: Option<String>,
    pub backend_env: Option<String>,
}

impl ForwardedHeaders {
    /// Pull the forwardable headers off a response.
    #[must_use]
    pub fn from_response(resp: &reqwest::Response) -> Self {
        let header = |name: &str| {
            resp.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(ToString::to_string)
        };
        Self {
            cache_hit: header("x-cache-hit"),
            backend_version: header("x-backend-version"),
            backend_env: header("x-backend-env"),
        }
    }

    /// Name/value pairs for re-emission, skipping absent headers.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(v) = &self.cache_hit {
            pairs.push(("x-cache-hit", v.clone()));
        }
        if let Some(v) = &self.backend_version {
            pairs.push(("x-backend-version", v.clone()));
        }
        if let Some(v) = &self.backend_env {
            pairs.push(("x-backend-env", v.clone()));
        }
        pairs
    }
}

/// Check an HTTP response for error conditions.
///
/// Returns the response unchanged on success. On a non-success status the
/// body is drained and searched for a `detail` or `message` key; failing
/// that, the raw body is used, and an empty body falls back to `fallback`.
pub(crate) async fn check_response(
    resp: reqwest::Response,
    fallback: &str,
) -> Result<reqwest::Response, BackendError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let message = extract_message(&body)
        .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
        .unwrap_or_else(|| fallback.to_string());

    Err(BackendError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Best-effort `detail`/`message` extraction from a JSON error body.
fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")
        .or_else(|| value.get("message"))
        .or_else(|| value.get("error"))
        .and_then(|v| v.as_str())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn extract_message_prefers_detail() {
        let body = r#"{"detail": "Estimate not found", "message": "other"}"#;
        assert_eq!(extract_message(body).as_deref(), Some("Estimate not found"));
    }

    #[test]
    fn extract_message_falls_through_keys() {
        assert_eq!(
            extract_message(r#"{"message": "nope"}"#).as_deref(),
            Some("nope")
        );
        assert_eq!(
            extract_message(r#"{"error": "boom"}"#).as_deref(),
            Some("boom")
        );
        assert_eq!(extract_message("not json"), None);
        assert_eq!(extract_message(r#"{"detail": 17}"#), None);
    }

    #[tokio::test]
    async fn check_response_uses_fallback_for_empty_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/boom")
            .with_status(502)
            .create_async()
            .await;

        let resp = reqwest::get(format!("{}/boom", server.url()))
            .await
            .expect("request");
        let err = check_response(resp, "Failed to fetch estimates")
            .await
            .unwrap_err();
        match err {
            BackendError::Api { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Failed to fetch estimates");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn forwarded_headers_capture_present_values() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/ok")
            .with_header("x-cache-hit", "true")
            .with_header("x-backend-env", "qa")
            .with_body("{}")
            .create_async()
            .await;

        let resp = reqwest::get(format!("{}/ok", server.url()))
            .await
            .expect("request");
        let headers = ForwardedHeaders::from_response(&resp);
        assert_eq!(headers.cache_hit.as_deref(), Some("true"));
        assert_eq!(headers.backend_version, None);
        assert_eq!(
            headers.pairs(),
            vec![
                ("x-cache-hit", "true".to_string()),
                ("x-backend-env", "qa".to_string())
            ]
        );
    }
}
