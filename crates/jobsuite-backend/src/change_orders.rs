//! Change order calls, nested under their estimate.

use serde_json::Value;

use crate::{BackendClient, error::BackendError, http::check_response};

impl BackendClient {
    /// List change orders for an estimate.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport failure or a non-success status.
    pub async fn list_change_orders(
        &self,
        token: &str,
        contractor_id: &str,
        estimate_id: &str,
    ) -> Result<Value, BackendError> {
        let url = self.contractor_url(
            contractor_id,
            &format!("estimates/{estimate_id}/change-orders"),
        );
        let resp = self.http().get(url).bearer_auth(token).send().await?;
        let resp = check_response(resp, "Failed to fetch change orders").await?;
        Ok(resp.json().await?)
    }

    /// Create a change order. The upstream accepts an empty body, so `body`
    /// is optional.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport failure or a non-success status.
    pub async fn create_change_order(
        &self,
        token: &str,
        contractor_id: &str,
        estimate_id: &str,
        body: Option<&Value>,
    ) -> Result<Value, BackendError> {
        let url = self.contractor_url(
            contractor_id,
            &format!("estimates/{estimate_id}/change-orders"),
        );
        let mut req = self.http().post(url).bearer_auth(token);
        if let Some(body) = body {
            req = req.json(body);
        }
        let resp = req.send().await?;
        let resp = check_response(resp, "Failed to create change order").await?;
        Ok(resp.json().await?)
    }
}
