//! Contractor client (customer record) calls.

use jobsuite_core::ContractorClient;
use serde_json::Value;

use crate::{BackendClient, error::BackendError, http::check_response};

impl BackendClient {
    /// List clients, optionally filtered by a free-text search (delegated
    /// upstream).
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport failure or a non-success status.
    pub async fn list_clients(
        &self,
        token: &str,
        contractor_id: &str,
        search: Option<&str>,
    ) -> Result<Value, BackendError> {
        let mut url = self.contractor_url(contractor_id, "clients");
        if let Some(search) = search {
            url.push_str(&format!("?search={}", urlencoding::encode(search)));
        }
        let resp = self.http().get(url).bearer_auth(token).send().await?;
        let resp = check_response(resp, "Failed to fetch clients").await?;
        Ok(resp.json().await?)
    }

    /// Typed client list for the cache and CLI.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport, status, or parse failure.
    pub async fn fetch_clients(
        &self,
        token: &str,
        contractor_id: &str,
    ) -> Result<Vec<ContractorClient>, BackendError> {
        let value = self.list_clients(token, contractor_id, None).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Create a client record.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport failure or a non-success status.
    pub async fn create_client(
        &self,
        token: &str,
        contractor_id: &str,
        body: &Value,
    ) -> Result<Value, BackendError> {
        let url = self.contractor_url(contractor_id, "clients");
        let resp = self
            .http()
            .post(url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        let resp = check_response(resp, "Failed to create client").await?;
        Ok(resp.json().await?)
    }

    /// Fetch one client.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport failure or a non-success status.
    pub async fn get_client(
        &self,
        token: &str,
        contractor_id: &str,
        client_id: &str,
    ) -> Result<Value, BackendError> {
        let url = self.contractor_url(contractor_id, &format!("clients/{client_id}"));
        let resp = self.http().get(url).bearer_auth(token).send().await?;
        let resp = check_response(resp, "Failed to fetch client").await?;
        Ok(resp.json().await?)
    }

    /// Update a client.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport failure or a non-success status.
    pub async fn update_client(
        &self,
        token: &str,
        contractor_id: &str,
        client_id: &str,
        body: &Value,
    ) -> Result<Value, BackendError> {
        let url = self.contractor_url(contractor_id, &format!("clients/{client_id}"));
        let resp = self
            .http()
            .put(url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        let resp = check_response(resp, "Failed to update client").await?;
        Ok(resp.json().await?)
    }

    /// Delete a client.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport failure or a non-success status.
    pub async fn delete_client(
        &self,
        token: &str,
        contractor_id: &str,
        client_id: &str,
    ) -> Result<Value, BackendError> {
        let url = self.contractor_url(contractor_id, &format!("clients/{client_id}"));
        let resp = self.http().delete(url).bearer_auth(token).send().await?;
        let resp = check_response(resp, "Failed to delete client").await?;
        Ok(resp.json().await.unwrap_or(Value::Null))
    }
}
