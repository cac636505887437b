//! Outreach (follow-up) message calls.

use serde_json::Value;

use crate::{BackendClient, error::BackendError, http::check_response};

/// Filters accepted by the outreach list endpoint.
#[derive(Debug, Clone, Default)]
pub struct OutreachQuery {
    pub estimate_id: Option<String>,
    pub status: Option<String>,
    pub due_before: Option<String>,
}

impl OutreachQuery {
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut params = Vec::new();
        if let Some(estimate_id) = &self.estimate_id {
            params.push(format!("estimate_id={}", urlencoding::encode(estimate_id)));
        }
        if let Some(status) = &self.status {
            params.push(format!("status={}", urlencoding::encode(status)));
        }
        if let Some(due_before) = &self.due_before {
            params.push(format!("due_before={}", urlencoding::encode(due_before)));
        }
        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

impl BackendClient {
    /// List outreach messages.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport failure or a non-success status.
    pub async fn list_outreach_messages(
        &self,
        token: &str,
        contractor_id: &str,
        query: &OutreachQuery,
    ) -> Result<Value, BackendError> {
        let url = format!(
            "{}{}",
            self.contractor_url(contractor_id, "outreach-messages"),
            query.to_query_string()
        );
        let resp = self.http().get(url).bearer_auth(token).send().await?;
        let resp = check_response(resp, "Failed to fetch outreach messages").await?;
        Ok(resp.json().await?)
    }

    /// Create an outreach message.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport failure or a non-success status.
    pub async fn create_outreach_message(
        &self,
        token: &str,
        contractor_id: &str,
        body: &Value,
    ) -> Result<Value, BackendError> {
        let url = self.contractor_url(contractor_id, "outreach-messages");
        let resp = self
            .http()
            .post(url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        let resp = check_response(resp, "Failed to create outreach message").await?;
        Ok(resp.json().await?)
    }

    /// Trigger an immediate send of an outreach message.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport failure or a non-success status.
    pub async fn send_outreach_message(
        &self,
        token: &str,
        contractor_id: &str,
        message_id: &str,
    ) -> Result<Value, BackendError> {
        let url =
            self.contractor_url(contractor_id, &format!("outreach-messages/{message_id}/send"));
        let resp = self.http().post(url).bearer_auth(token).send().await?;
        let resp = check_response(resp, "Failed to send outreach message").await?;
        Ok(resp.json().await.unwrap_or(Value::Null))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn query_string_includes_all_filters() {
        let query = OutreachQuery {
            estimate_id: Some("e-1".into()),
            status: Some("PENDING".into()),
            due_before: Some("2026-09-01".into()),
        };
        assert_eq!(
            query.to_query_string(),
            "?estimate_id=e-1&status=PENDING&due_before=2026-09-01"
        );
    }

    #[tokio::test]
    async fn send_posts_to_the_send_path() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v1/contractors/c-1/outreach-messages/om-4/send")
            .with_body(r#"{"id": "om-4", "status": "SENT"}"#)
            .create_async()
            .await;

        let client = BackendClient::new(server.url());
        let sent = client
            .send_outreach_message("tok", "c-1", "om-4")
            .await
            .expect("send");
        assert_eq!(sent["status"], "SENT");
        mock.assert_async().await;
    }
}
