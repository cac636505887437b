//! Homepage aggregate data.

use serde_json::Value;

use crate::{BackendClient, error::BackendError, http::check_response};

impl BackendClient {
    /// Fetch the homepage aggregate payload.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport failure or a non-success status.
    pub async fn homepage_data(
        &self,
        token: &str,
        contractor_id: &str,
    ) -> Result<Value, BackendError> {
        let url = self.contractor_url(contractor_id, "homepage/data");
        let resp = self.http().get(url).bearer_auth(token).send().await?;
        let resp = check_response(resp, "Failed to fetch homepage data").await?;
        Ok(resp.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn homepage_data_passes_through() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/contractors/c-1/homepage/data")
            .with_body(r#"{"open_estimates": 4, "active_projects": 2}"#)
            .create_async()
            .await;

        let client = BackendClient::new(server.url());
        let data = client.homepage_data("tok", "c-1").await.expect("homepage");
        assert_eq!(data["open_estimates"], 4);
    }
}
