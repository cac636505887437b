//! Estimate resource calls.

use jobsuite_core::Estimate;
use serde_json::Value;

use crate::{
    BackendClient,
    error::BackendError,
    http::{ForwardedHeaders, check_response},
};

/// Filters accepted by the estimate list endpoint.
#[derive(Debug, Clone, Default)]
pub struct EstimateQuery {
    pub client_id: Option<String>,
    /// Single status value; the upstream does not accept multiple.
    pub status: Option<String>,
}

impl EstimateQuery {
    /// Render as a query string, empty when no filter is set.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut params = Vec::new();
        if let Some(client_id) = &self.client_id {
            params.push(format!("client_id={}", urlencoding::encode(client_id)));
        }
        if let Some(status) = &self.status {
            params.push(format!("status={}", urlencoding::encode(status)));
        }
        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

impl BackendClient {
    /// List estimates for a contractor. Returns the raw JSON array plus the
    /// forwardable cache headers.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport failure or a non-success status.
    pub async fn list_estimates(
        &self,
        token: &str,
        contractor_id: &str,
        query: &EstimateQuery,
    ) -> Result<(Value, ForwardedHeaders), BackendError> {
        let url = format!(
            "{}{}",
            self.contractor_url(contractor_id, "estimates"),
            query.to_query_string()
        );
        let resp = self.http().get(url).bearer_auth(token).send().await?;
        let resp = check_response(resp, "Failed to fetch estimates").await?;
        let headers = ForwardedHeaders::from_response(&resp);
        Ok((resp.json().await?, headers))
    }

    /// Typed estimate list for the cache and CLI.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport, status, or parse failure.
    pub async fn fetch_estimates(
        &self,
        token: &str,
        contractor_id: &str,
    ) -> Result<Vec<Estimate>, BackendError> {
        let (value, _) = self
            .list_estimates(token, contractor_id, &EstimateQuery::default())
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Fetch a single estimate.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport failure or a non-success status.
    pub async fn get_estimate(
        &self,
        token: &str,
        contractor_id: &str,
        estimate_id: &str,
    ) -> Result<(Value, ForwardedHeaders), BackendError> {
        let url = self.contractor_url(contractor_id, &format!("estimates/{estimate_id}"));
        let resp = self.http().get(url).bearer_auth(token).send().await?;
        let resp = check_response(resp, "Failed to fetch estimate").await?;
        let headers = ForwardedHeaders::from_response(&resp);
        Ok((resp.json().await?, headers))
    }

    /// Create an estimate.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport failure or a non-success status.
    pub async fn create_estimate(
        &self,
        token: &str,
        contractor_id: &str,
        body: &Value,
    ) -> Result<(Value, ForwardedHeaders), BackendError> {
        let url = self.contractor_url(contractor_id, "estimates");
        let resp = self
            .http()
            .post(url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        let resp = check_response(resp, "Failed to create estimate").await?;
        let headers = ForwardedHeaders::from_response(&resp);
        Ok((resp.json().await?, headers))
    }

    /// Update an estimate (full or partial field set).
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport failure or a non-success status.
    pub async fn update_estimate(
        &self,
        token: &str,
        contractor_id: &str,
        estimate_id: &str,
        body: &Value,
    ) -> Result<Value, BackendError> {
        let url = self.contractor_url(contractor_id, &format!("estimates/{estimate_id}"));
        let resp = self
            .http()
            .put(url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        let resp = check_response(resp, "Failed to update estimate").await?;
        Ok(resp.json().await?)
    }

    /// Delete an estimate.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport failure or a non-success status.
    pub async fn delete_estimate(
        &self,
        token: &str,
        contractor_id: &str,
        estimate_id: &str,
    ) -> Result<Value, BackendError> {
        let url = self.contractor_url(contractor_id, &format!("estimates/{estimate_id}"));
        let resp = self.http().delete(url).bearer_auth(token).send().await?;
        let resp = check_response(resp, "Failed to delete estimate").await?;
        Ok(resp.json().await.unwrap_or(Value::Null))
    }

    /// Fetch the aggregate detail payload (line item counts, media flags).
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport failure or a non-success status.
    pub async fn estimate_details(
        &self,
        token: &str,
        contractor_id: &str,
        estimate_id: &str,
    ) -> Result<Value, BackendError> {
        let url = self.contractor_url(contractor_id, &format!("estimates/{estimate_id}/details"));
        let resp = self.http().get(url).bearer_auth(token).send().await?;
        let resp = check_response(resp, "Failed to fetch estimate details").await?;
        Ok(resp.json().await?)
    }

    /// Trigger the estimate send-email flow.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport failure or a non-success status.
    pub async fn send_estimate_email(
        &self,
        token: &str,
        contractor_id: &str,
        estimate_id: &str,
        body: &Value,
    ) -> Result<Value, BackendError> {
        let url =
            self.contractor_url(contractor_id, &format!("estimates/{estimate_id}/send-email"));
        let resp = self
            .http()
            .post(url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        let resp = check_response(resp, "Failed to send estimate").await?;
        Ok(resp.json().await.unwrap_or(Value::Null))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn query_string_is_empty_without_filters() {
        assert_eq!(EstimateQuery::default().to_query_string(), "");
    }

    #[test]
    fn query_string_encodes_values() {
        let query = EstimateQuery {
            client_id: Some("cl 1".into()),
            status: Some("ESTIMATE_SENT".into()),
        };
        assert_eq!(
            query.to_query_string(),
            "?client_id=cl%201&status=ESTIMATE_SENT"
        );
    }

    #[tokio::test]
    async fn list_estimates_forwards_cache_headers() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/contractors/c-1/estimates")
            .match_header("authorization", "Bearer tok")
            .with_header("x-cache-hit", "true")
            .with_body(r#"[{"id": "e-1", "status": "NEW_LEAD"}]"#)
            .create_async()
            .await;

        let client = BackendClient::new(server.url());
        let (body, headers) = client
            .list_estimates("tok", "c-1", &EstimateQuery::default())
            .await
            .expect("list");
        assert_eq!(body.as_array().map(Vec::len), Some(1));
        assert_eq!(headers.cache_hit.as_deref(), Some("true"));
    }

    #[tokio::test]
    async fn fetch_estimates_deserializes_records() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/contractors/c-1/estimates")
            .with_body(
                r#"[
                    {"id": "e-1", "status": "ESTIMATE_SENT", "client_name": "Acme"},
                    {"id": "e-2", "status": "NEW_LEAD"}
                ]"#,
            )
            .create_async()
            .await;

        let client = BackendClient::new(server.url());
        let estimates = client.fetch_estimates("tok", "c-1").await.expect("fetch");
        assert_eq!(estimates.len(), 2);
        assert_eq!(estimates[0].client_name.as_deref(), Some("Acme"));
    }

    #[tokio::test]
    async fn update_estimate_puts_json_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/api/v1/contractors/c-1/estimates/e-9")
            .match_body(mockito::Matcher::Json(json!({"status": "ESTIMATE_SENT"})))
            .with_body(r#"{"id": "e-9", "status": "ESTIMATE_SENT"}"#)
            .create_async()
            .await;

        let client = BackendClient::new(server.url());
        let updated = client
            .update_estimate("tok", "c-1", "e-9", &json!({"status": "ESTIMATE_SENT"}))
            .await
            .expect("update");
        assert_eq!(updated["status"], "ESTIMATE_SENT");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn upstream_error_carries_detail() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/contractors/c-1/estimates/missing")
            .with_status(404)
            .with_body(r#"{"detail": "Estimate not found"}"#)
            .create_async()
            .await;

        let client = BackendClient::new(server.url());
        let err = client
            .get_estimate("tok", "c-1", "missing")
            .await
            .unwrap_err();
        match err {
            BackendError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Estimate not found");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
