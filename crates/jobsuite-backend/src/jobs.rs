//! Project (job-phase estimate) calls.
//!
//! The upstream keeps project-phase estimates under `jobs`; the gateway and
//! cache expose them as "projects".

use jobsuite_core::Estimate;
use serde_json::Value;

use crate::{BackendClient, error::BackendError, estimates::EstimateQuery, http::check_response};

impl BackendClient {
    /// List jobs (project-phase estimates) for a contractor.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport failure or a non-success status.
    pub async fn list_jobs(
        &self,
        token: &str,
        contractor_id: &str,
        query: &EstimateQuery,
    ) -> Result<Value, BackendError> {
        let url = format!(
            "{}{}",
            self.contractor_url(contractor_id, "jobs"),
            query.to_query_string()
        );
        let resp = self.http().get(url).bearer_auth(token).send().await?;
        let resp = check_response(resp, "Failed to fetch projects").await?;
        Ok(resp.json().await?)
    }

    /// Typed project list for the cache and CLI.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport, status, or parse failure.
    pub async fn fetch_projects(
        &self,
        token: &str,
        contractor_id: &str,
    ) -> Result<Vec<Estimate>, BackendError> {
        let value = self
            .list_jobs(token, contractor_id, &EstimateQuery::default())
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Create a job.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport failure or a non-success status.
    pub async fn create_job(
        &self,
        token: &str,
        contractor_id: &str,
        body: &Value,
    ) -> Result<Value, BackendError> {
        let url = self.contractor_url(contractor_id, "jobs");
        let resp = self
            .http()
            .post(url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        let resp = check_response(resp, "Failed to create project").await?;
        Ok(resp.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn jobs_path_is_used_for_projects() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/contractors/c-1/jobs?status=PROJECT_SCHEDULED")
            .with_body(r#"[{"id": "e-3", "status": "PROJECT_SCHEDULED"}]"#)
            .create_async()
            .await;

        let client = BackendClient::new(server.url());
        let query = EstimateQuery {
            client_id: None,
            status: Some("PROJECT_SCHEDULED".into()),
        };
        let body = client.list_jobs("tok", "c-1", &query).await.expect("list");
        assert_eq!(body[0]["id"], "e-3");
        mock.assert_async().await;
    }
}
