//! `/users/me` identity probe.

use jobsuite_core::User;

use crate::{BackendClient, error::BackendError, http::check_response};

impl BackendClient {
    /// Fetch the authenticated user.
    ///
    /// # Errors
    ///
    /// A 401 upstream surfaces as `Invalid or expired token`; other failures
    /// follow the usual `detail`/`message` extraction.
    pub async fn me(&self, token: &str) -> Result<User, BackendError> {
        let resp = self
            .http()
            .get(self.v1("users/me"))
            .bearer_auth(token)
            .send()
            .await?;

        if resp.status().as_u16() == 401 {
            return Err(BackendError::Api {
                status: 401,
                message: "Invalid or expired token".to_string(),
            });
        }

        let resp = check_response(resp, "Failed to fetch user").await?;
        Ok(resp.json().await?)
    }

    /// Resolve the caller's contractor id via `/users/me`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::MissingContractorId`] when the user record has
    /// none.
    pub async fn contractor_id(&self, token: &str) -> Result<String, BackendError> {
        self.me(token)
            .await?
            .contractor_id
            .filter(|id| !id.is_empty())
            .ok_or(BackendError::MissingContractorId)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn contractor_id_comes_from_users_me() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/users/me")
            .match_header("authorization", "Bearer tok-1")
            .with_body(r#"{"id": "u-1", "email": "a@b.c", "contractor_id": "c-42"}"#)
            .create_async()
            .await;

        let client = BackendClient::new(server.url());
        let id = client.contractor_id("tok-1").await.expect("contractor id");
        assert_eq!(id, "c-42");
    }

    #[tokio::test]
    async fn missing_contractor_id_is_typed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/users/me")
            .with_body(r#"{"id": "u-1", "email": "a@b.c"}"#)
            .create_async()
            .await;

        let client = BackendClient::new(server.url());
        let err = client.contractor_id("tok-1").await.unwrap_err();
        assert!(matches!(err, BackendError::MissingContractorId));
    }

    #[tokio::test]
    async fn upstream_401_maps_to_invalid_token_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/users/me")
            .with_status(401)
            .with_body(r#"{"detail": "Could not validate credentials"}"#)
            .create_async()
            .await;

        let client = BackendClient::new(server.url());
        let err = client.me("stale").await.unwrap_err();
        match err {
            BackendError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid or expired token");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
