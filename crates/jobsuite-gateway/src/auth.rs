//! Per-request auth and contractor resolution.

use axum::http::HeaderMap;

use crate::error::ApiError;
use crate::state::AppState;

pub const CONTRACTOR_HEADER: &str = "x-contractor-id";

/// Pull the bearer token off the request, or the shared 401.
///
/// # Errors
///
/// Returns the gateway's standard 401 when the header is absent or not a
/// bearer credential.
pub fn bearer_token(headers: &HeaderMap) -> Result<String, ApiError> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
        .map(ToString::to_string)
        .ok_or_else(ApiError::unauthorized)
}

/// Resolve the contractor id for a request.
///
/// The `X-Contractor-ID` header wins (the caller already knows it); else the
/// upstream `users/me` probe runs. A user without a contractor id answers
/// 400 with `missing_message`.
///
/// # Errors
///
/// Returns [`ApiError`] on a missing contractor id or a failed probe.
pub async fn contractor_id(
    state: &AppState,
    headers: &HeaderMap,
    token: &str,
    missing_message: &str,
) -> Result<String, ApiError> {
    if let Some(id) = headers
        .get(CONTRACTOR_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|id| !id.is_empty())
    {
        return Ok(id.to_string());
    }

    match state.backend.contractor_id(token).await {
        Ok(id) => Ok(id),
        Err(jobsuite_backend::BackendError::MissingContractorId) => Err(ApiError::message(
            axum::http::StatusCode::BAD_REQUEST,
            missing_message,
        )),
        Err(error) => Err(ApiError::from_backend(
            &error,
            "An error occurred while resolving the contractor",
        )),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn bearer_token_requires_the_scheme() {
        let mut headers = HeaderMap::new();
        assert!(bearer_token(&headers).is_err());

        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcg=="),
        );
        assert!(bearer_token(&headers).is_err());

        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_static("Bearer tok-123"),
        );
        assert_eq!(bearer_token(&headers).expect("token"), "tok-123");
    }

    #[test]
    fn empty_bearer_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_static("Bearer "),
        );
        assert!(bearer_token(&headers).is_err());
    }
}
