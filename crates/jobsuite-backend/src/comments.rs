//! Job comment calls. Comments are append-only.

use serde_json::Value;

use crate::{BackendClient, error::BackendError, http::check_response};

impl BackendClient {
    /// List comments on an estimate.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport failure or a non-success status.
    pub async fn list_comments(
        &self,
        token: &str,
        contractor_id: &str,
        estimate_id: &str,
    ) -> Result<Value, BackendError> {
        let url = self.contractor_url(contractor_id, &format!("estimates/{estimate_id}/comments"));
        let resp = self.http().get(url).bearer_auth(token).send().await?;
        let resp = check_response(resp, "Failed to fetch comments").await?;
        Ok(resp.json().await?)
    }

    /// Append a comment to an estimate.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport failure or a non-success status.
    pub async fn create_comment(
        &self,
        token: &str,
        contractor_id: &str,
        estimate_id: &str,
        comment_contents: &str,
    ) -> Result<Value, BackendError> {
        let url = self.contractor_url(contractor_id, &format!("estimates/{estimate_id}/comments"));
        let resp = self
            .http()
            .post(url)
            .bearer_auth(token)
            .json(&serde_json::json!({ "comment_contents": comment_contents }))
            .send()
            .await?;
        let resp = check_response(resp, "Failed to create comment").await?;
        Ok(resp.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn comments_nest_under_their_estimate() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v1/contractors/c-1/estimates/e-1/comments")
            .match_body(mockito::Matcher::Json(
                serde_json::json!({"comment_contents": "Called the client"}),
            ))
            .with_status(201)
            .with_body(r#"{"id": "cm-1", "comment_contents": "Called the client"}"#)
            .create_async()
            .await;

        let client = BackendClient::new(server.url());
        let created = client
            .create_comment("tok", "c-1", "e-1", "Called the client")
            .await
            .expect("create");
        assert_eq!(created["id"], "cm-1");
        mock.assert_async().await;
    }
}
