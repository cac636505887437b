//! Line item calls, nested under their estimate.

use serde_json::Value;

use crate::{BackendClient, error::BackendError, http::check_response};

impl BackendClient {
    /// List line items for an estimate.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport failure or a non-success status.
    pub async fn list_line_items(
        &self,
        token: &str,
        contractor_id: &str,
        estimate_id: &str,
    ) -> Result<Value, BackendError> {
        let url =
            self.contractor_url(contractor_id, &format!("estimates/{estimate_id}/line-items"));
        let resp = self.http().get(url).bearer_auth(token).send().await?;
        let resp = check_response(resp, "Failed to fetch line items").await?;
        Ok(resp.json().await?)
    }

    /// Create a line item.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport failure or a non-success status.
    pub async fn create_line_item(
        &self,
        token: &str,
        contractor_id: &str,
        estimate_id: &str,
        body: &Value,
    ) -> Result<Value, BackendError> {
        let url =
            self.contractor_url(contractor_id, &format!("estimates/{estimate_id}/line-items"));
        let resp = self
            .http()
            .post(url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        let resp = check_response(resp, "Failed to create line item").await?;
        Ok(resp.json().await?)
    }

    /// Update a line item.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport failure or a non-success status.
    pub async fn update_line_item(
        &self,
        token: &str,
        contractor_id: &str,
        estimate_id: &str,
        line_item_id: &str,
        body: &Value,
    ) -> Result<Value, BackendError> {
        let url = self.contractor_url(
            contractor_id,
            &format!("estimates/{estimate_id}/line-items/{line_item_id}"),
        );
        let resp = self
            .http()
            .put(url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        let resp = check_response(resp, "Failed to update line item").await?;
        Ok(resp.json().await?)
    }

    /// Delete a line item.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport failure or a non-success status.
    pub async fn delete_line_item(
        &self,
        token: &str,
        contractor_id: &str,
        estimate_id: &str,
        line_item_id: &str,
    ) -> Result<Value, BackendError> {
        let url = self.contractor_url(
            contractor_id,
            &format!("estimates/{estimate_id}/line-items/{line_item_id}"),
        );
        let resp = self.http().delete(url).bearer_auth(token).send().await?;
        let resp = check_response(resp, "Failed to delete line item").await?;
        Ok(resp.json().await.unwrap_or(Value::Null))
    }

    /// Reorder line items. Body is `{"line_item_ids": [...]}`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport failure or a non-success status.
    pub async fn reorder_line_items(
        &self,
        token: &str,
        contractor_id: &str,
        estimate_id: &str,
        body: &Value,
    ) -> Result<Value, BackendError> {
        let url = self.contractor_url(
            contractor_id,
            &format!("estimates/{estimate_id}/line-items/reorder"),
        );
        let resp = self
            .http()
            .put(url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        let resp = check_response(resp, "Failed to reorder line items").await?;
        Ok(resp.json().await.unwrap_or(Value::Null))
    }
}
