//! Jira REST v3 issue creation.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

use crate::{error::BackendError, http::check_response};

/// Client for a Jira site, authenticated with email + API token basic auth.
pub struct JiraClient {
    http: reqwest::Client,
    base_url: String,
    email: String,
    api_token: String,
}

impl JiraClient {
    #[must_use]
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        email: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            email: email.into(),
            api_token: api_token.into(),
        }
    }

    /// Create an issue and return its browse URL.
    ///
    /// `fields` is the full Jira `fields` object (project, summary, ADF
    /// description, issuetype, custom fields).
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport failure, a non-success status,
    /// or a response without an issue key.
    pub async fn create_issue(&self, fields: &Value) -> Result<String, BackendError> {
        let auth = STANDARD.encode(format!("{}:{}", self.email, self.api_token));
        let resp = self
            .http
            .post(format!("{}/rest/api/3/issue", self.base_url))
            .header("Authorization", format!("Basic {auth}"))
            .json(&serde_json::json!({ "fields": fields }))
            .send()
            .await?;
        let resp = check_response(resp, "Failed to create JIRA ticket").await?;

        let body: Value = resp.json().await?;
        let key = body
            .get("key")
            .and_then(Value::as_str)
            .ok_or_else(|| BackendError::Api {
                status: 502,
                message: "Jira response missing issue key".to_string(),
            })?;

        tracing::info!(issue = key, "created Jira ticket");
        Ok(format!("{}/browse/{key}", self.base_url))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn create_issue_returns_browse_url() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/rest/api/3/issue")
            .match_header(
                "authorization",
                format!("Basic {}", STANDARD.encode("ops@example.com:tok")).as_str(),
            )
            .with_status(201)
            .with_body(r#"{"id": "10001", "key": "JOB-42"}"#)
            .create_async()
            .await;

        let client = JiraClient::new(
            reqwest::Client::new(),
            server.url(),
            "ops@example.com",
            "tok",
        );
        let url = client
            .create_issue(&serde_json::json!({"summary": "Acme bid"}))
            .await
            .expect("create");
        assert_eq!(url, format!("{}/browse/JOB-42", server.url()));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn missing_key_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/rest/api/3/issue")
            .with_status(201)
            .with_body(r#"{"id": "10001"}"#)
            .create_async()
            .await;

        let client = JiraClient::new(reqwest::Client::new(), server.url(), "e", "t");
        let err = client
            .create_issue(&serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("missing issue key"));
    }
}
