//! Gateway error responses.
//!
//! Handlers answer errors as single-key JSON objects. Most routes use the
//! `message` key; the send-estimate, presign, S3, and Jira routes use
//! `error` (their original consumers read that key).

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use jobsuite_backend::BackendError;
use serde_json::{Map, Value};

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    key: &'static str,
    text: String,
}

impl ApiError {
    #[must_use]
    pub fn message(status: StatusCode, text: impl Into<String>) -> Self {
        Self {
            status,
            key: "message",
            text: text.into(),
        }
    }

    #[must_use]
    pub fn error(status: StatusCode, text: impl Into<String>) -> Self {
        Self {
            status,
            key: "error",
            text: text.into(),
        }
    }

    /// The shared 401 for absent/malformed Authorization headers.
    #[must_use]
    pub fn unauthorized() -> Self {
        Self::message(
            StatusCode::UNAUTHORIZED,
            "Authorization header missing or invalid",
        )
    }

    /// Map an upstream error onto this route's response.
    ///
    /// API errors keep their status and extracted message; transport and
    /// parse failures become a 500 with `fallback`.
    #[must_use]
    pub fn from_backend(error: &BackendError, fallback: &str) -> Self {
        Self::backend_with_key("message", error, fallback)
    }

    /// Same mapping, answering on the `error` key.
    #[must_use]
    pub fn from_backend_error_key(error: &BackendError, fallback: &str) -> Self {
        Self::backend_with_key("error", error, fallback)
    }

    fn backend_with_key(key: &'static str, error: &BackendError, fallback: &str) -> Self {
        let (status, text) = match error {
            BackendError::Api { status, message } => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                message.clone(),
            ),
            BackendError::MissingContractorId => {
                (StatusCode::BAD_REQUEST, error.to_string())
            }
            BackendError::Http(_) | BackendError::Parse(_) => {
                tracing::error!(%error, "unexpected upstream failure");
                (StatusCode::INTERNAL_SERVER_ERROR, fallback.to_string())
            }
        };
        Self {
            status,
            key,
            text,
        }
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = Map::new();
        body.insert(self.key.to_string(), Value::String(self.text));
        (self.status, Json(Value::Object(body))).into_response()
    }
}
