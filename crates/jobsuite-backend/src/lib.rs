//! # jobsuite-backend
//!
//! Typed HTTP client for the upstream JobSuite REST API, one module per
//! resource:
//! - estimates (list/get/create/update/delete, details, send-email)
//! - line items and change orders
//! - clients, jobs (projects), comments, outreach messages, homepage
//! - multipart upload coordination endpoints
//! - users (`/users/me` contractor-id probe)
//! - Jira issue creation (separate [`JiraClient`])
//!
//! Passthrough surfaces return `serde_json::Value` so the gateway relays
//! upstream bodies without reshaping them; the cache and CLI use the typed
//! `fetch_*` wrappers instead.

pub mod change_orders;
pub mod clients;
pub mod comments;
pub mod estimates;
pub mod homepage;
pub mod jira;
pub mod jobs;
pub mod line_items;
pub mod multipart;
pub mod outreach;
pub mod users;

mod error;
mod http;

pub use error::BackendError;
pub use estimates::EstimateQuery;
pub use http::ForwardedHeaders;
pub use jira::JiraClient;
pub use outreach::OutreachQuery;

/// HTTP client for the upstream REST API.
///
/// Holds no credentials: every call takes the bearer token of the request it
/// serves, so one client is shared across all users of the gateway.
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Create a client against `base_url` (no trailing slash).
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(
            reqwest::Client::builder()
                .user_agent("jobsuite/0.1")
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("reqwest client should build"),
            base_url,
        )
    }

    /// Create a client reusing an existing `reqwest::Client`.
    #[must_use]
    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// URL under `/api/v1/`.
    pub(crate) fn v1(&self, path: &str) -> String {
        format!("{}/api/v1/{path}", self.base_url)
    }

    /// URL under the contractor scope.
    pub(crate) fn contractor_url(&self, contractor_id: &str, path: &str) -> String {
        self.v1(&format!("contractors/{contractor_id}/{path}"))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn url_builders_compose_the_contractor_scope() {
        let client = BackendClient::new("https://qa.api.jobsuite.app");
        assert_eq!(
            client.v1("users/me"),
            "https://qa.api.jobsuite.app/api/v1/users/me"
        );
        assert_eq!(
            client.contractor_url("c-9", "estimates/e-1/comments"),
            "https://qa.api.jobsuite.app/api/v1/contractors/c-9/estimates/e-1/comments"
        );
    }
}
