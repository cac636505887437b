//! Password-grant service login against the backend.
//!
//! Tokens from `/api/v1/auth/login` nominally live 60 minutes; the cache
//! keeps them for 50 and refreshes a minute early, so a token handed out here
//! always has usable life left.

use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::error::AuthError;

/// How long a fetched token is served from cache.
const CACHE_TTL_MINUTES: i64 = 50;
/// Refresh margin: a cached token within this window of expiry is replaced.
const EARLY_REFRESH_SECS: i64 = 60;

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    access_token: Option<String>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

/// Service-account login client with token caching.
pub struct ServiceLogin {
    http: reqwest::Client,
    base_url: String,
    email: String,
    password: String,
    cached: Mutex<Option<CachedToken>>,
}

impl ServiceLogin {
    #[must_use]
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            email: email.into(),
            password: password.into(),
            cached: Mutex::new(None),
        }
    }

    /// Get a valid access token, logging in only when the cached one is
    /// missing or inside the early-refresh margin.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::LoginFailed`] when the backend rejects the
    /// credentials or answers without an `access_token`.
    pub async fn token(&self) -> Result<String, AuthError> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.expires_at > Utc::now() + TimeDelta::seconds(EARLY_REFRESH_SECS) {
                return Ok(token.access_token.clone());
            }
        }

        let access_token = self.login().await.inspect_err(|_| *cached = None)?;
        *cached = Some(CachedToken {
            access_token: access_token.clone(),
            expires_at: Utc::now() + TimeDelta::minutes(CACHE_TTL_MINUTES),
        });
        Ok(access_token)
    }

    /// Perform the password-grant login, bypassing the cache.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::LoginFailed`] on a non-success response or a
    /// response body without an `access_token`.
    pub async fn login(&self) -> Result<String, AuthError> {
        let form = [
            ("grant_type", "password"),
            ("username", self.email.as_str()),
            ("password", self.password.as_str()),
            ("scope", ""),
            ("client_id", "string"),
            ("client_secret", "string"),
        ];

        let resp = self
            .http
            .post(format!("{}/api/v1/auth/login", self.base_url))
            .form(&form)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let detail = resp
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|body| {
                    body.get("detail")
                        .or_else(|| body.get("error"))
                        .and_then(|v| v.as_str())
                        .map(ToString::to_string)
                })
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(AuthError::LoginFailed(format!("{detail} ({status})")));
        }

        let body: LoginResponse = resp
            .json()
            .await
            .map_err(|e| AuthError::LoginFailed(format!("malformed login response: {e}")))?;

        body.access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AuthError::LoginFailed("no access token in response".into()))
    }

    /// Drop the cached token (forced refresh, credential rotation).
    pub async fn clear_cache(&self) {
        *self.cached.lock().await = None;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn login_client(server: &mockito::ServerGuard) -> ServiceLogin {
        ServiceLogin::new(
            reqwest::Client::new(),
            server.url(),
            "svc@example.com",
            "hunter2",
        )
    }

    #[tokio::test]
    async fn login_posts_password_grant_form() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v1/auth/login")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("grant_type".into(), "password".into()),
                mockito::Matcher::UrlEncoded("username".into(), "svc@example.com".into()),
                mockito::Matcher::UrlEncoded("client_id".into(), "string".into()),
                mockito::Matcher::UrlEncoded("client_secret".into(), "string".into()),
            ]))
            .with_body(r#"{"access_token": "tok-1", "token_type": "bearer"}"#)
            .create_async()
            .await;

        let token = login_client(&server).token().await.expect("token");
        assert_eq!(token, "tok-1");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn second_call_is_served_from_cache() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v1/auth/login")
            .with_body(r#"{"access_token": "tok-cached"}"#)
            .expect(1)
            .create_async()
            .await;

        let login = login_client(&server);
        assert_eq!(login.token().await.expect("first"), "tok-cached");
        assert_eq!(login.token().await.expect("second"), "tok-cached");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn rejected_credentials_surface_detail() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/v1/auth/login")
            .with_status(401)
            .with_body(r#"{"detail": "Incorrect email or password"}"#)
            .create_async()
            .await;

        let err = login_client(&server).token().await.unwrap_err();
        assert!(matches!(err, AuthError::LoginFailed(_)));
        assert!(err.to_string().contains("Incorrect email or password"));
    }

    #[tokio::test]
    async fn empty_token_in_response_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/v1/auth/login")
            .with_body(r#"{"token_type": "bearer"}"#)
            .create_async()
            .await;

        let err = login_client(&server).token().await.unwrap_err();
        assert!(err.to_string().contains("no access token"));
    }
}
