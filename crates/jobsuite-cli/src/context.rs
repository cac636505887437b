//! Shared command context: config, backend client, stored credentials.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;
use jobsuite_backend::BackendClient;
use jobsuite_cache::{ActivityTracker, CacheDir, CacheStore, RefreshEngine, RefreshSchedule};
use jobsuite_config::JobsuiteConfig;

use crate::fetcher::BackendFetcher;

pub struct AppContext {
    pub config: JobsuiteConfig,
    pub backend: BackendClient,
    pub http: reqwest::Client,
}

impl AppContext {
    /// Load configuration and wire the backend client up.
    ///
    /// # Errors
    ///
    /// Returns an error when the config file cannot be read or parsed.
    pub fn init(config_path: Option<&Path>) -> anyhow::Result<Self> {
        let config = match config_path {
            Some(path) => JobsuiteConfig::load_from(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => JobsuiteConfig::load_with_dotenv().context("failed to load config")?,
        };
        let http = reqwest::Client::new();
        let backend = BackendClient::with_http(http.clone(), config.backend.resolved_base_url());
        Ok(Self {
            config,
            backend,
            http,
        })
    }

    /// Stored access token, with the login hint on failure.
    ///
    /// # Errors
    ///
    /// Returns an error when no usable token is stored.
    pub fn token(&self) -> anyhow::Result<String> {
        Ok(jobsuite_auth::resolve_token()?)
    }

    /// Contractor id for the stored token.
    ///
    /// # Errors
    ///
    /// Returns an error when the token is missing or the user record has no
    /// contractor id.
    pub async fn contractor_id(&self, token: &str) -> anyhow::Result<String> {
        Ok(self.backend.contractor_id(token).await?)
    }

    /// Open the snapshot-backed cache store.
    pub fn cache_store(&self) -> Arc<CacheStore> {
        Arc::new(CacheStore::open(CacheDir::new(self.config.cache.cache_dir())))
    }

    /// A refresh engine over the store, fetching with the stored token.
    ///
    /// # Errors
    ///
    /// Returns an error when credentials cannot be resolved.
    pub async fn refresh_engine(
        &self,
        store: Arc<CacheStore>,
    ) -> anyhow::Result<RefreshEngine<BackendFetcher>> {
        let token = self.token()?;
        let contractor_id = self.contractor_id(&token).await?;
        let fetcher = BackendFetcher::new(self.backend.clone(), token, contractor_id);
        let cache = &self.config.cache;
        let schedule = RefreshSchedule {
            expiration: std::time::Duration::from_secs(cache.expiration_secs),
            tick: std::time::Duration::from_secs(cache.tick_secs),
            activity_window: std::time::Duration::from_secs(cache.activity_window_secs),
        };
        Ok(RefreshEngine::new(
            store,
            Arc::new(fetcher),
            Arc::new(ActivityTracker::default()),
            schedule,
        ))
    }
}
