//! Cache fetcher backed by the upstream client.

use jobsuite_backend::{BackendClient, BackendError};
use jobsuite_cache::{CacheError, EntityFetcher};
use jobsuite_core::{ContractorClient, Estimate};

/// Fetches entity lists for the refresh engine with a fixed token and
/// contractor id.
pub struct BackendFetcher {
    backend: BackendClient,
    token: String,
    contractor_id: String,
}

impl BackendFetcher {
    #[must_use]
    pub const fn new(backend: BackendClient, token: String, contractor_id: String) -> Self {
        Self {
            backend,
            token,
            contractor_id,
        }
    }
}

fn fetch_error(error: &BackendError) -> CacheError {
    CacheError::Fetch(error.to_string())
}

impl EntityFetcher for BackendFetcher {
    async fn fetch_estimates(&self) -> Result<Vec<Estimate>, CacheError> {
        self.backend
            .fetch_estimates(&self.token, &self.contractor_id)
            .await
            .map_err(|e| fetch_error(&e))
    }

    async fn fetch_clients(&self) -> Result<Vec<ContractorClient>, CacheError> {
        self.backend
            .fetch_clients(&self.token, &self.contractor_id)
            .await
            .map_err(|e| fetch_error(&e))
    }

    async fn fetch_projects(&self) -> Result<Vec<Estimate>, CacheError> {
        self.backend
            .fetch_projects(&self.token, &self.contractor_id)
            .await
            .map_err(|e| fetch_error(&e))
    }
}
