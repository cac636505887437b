//! Shared gateway state.

use std::sync::Arc;

use jobsuite_backend::{BackendClient, JiraClient};
use jobsuite_config::JobsuiteConfig;

pub struct AppState {
    pub backend: BackendClient,
    pub config: JobsuiteConfig,
    pub http: reqwest::Client,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Wire up state from loaded configuration.
    #[must_use]
    pub fn from_config(config: JobsuiteConfig) -> Self {
        let http = reqwest::Client::new();
        let backend =
            BackendClient::with_http(http.clone(), config.backend.resolved_base_url());
        Self {
            backend,
            config,
            http,
        }
    }

    /// State over an explicit backend base URL, for tests and overrides.
    #[must_use]
    pub fn with_backend_url(config: JobsuiteConfig, base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::new();
        let backend = BackendClient::with_http(http.clone(), base_url);
        Self {
            backend,
            config,
            http,
        }
    }

    /// Jira client, when the integration is configured.
    #[must_use]
    pub fn jira(&self) -> Option<JiraClient> {
        let jira = &self.config.jira;
        jira.is_configured().then(|| {
            JiraClient::new(
                self.http.clone(),
                jira.base_url.clone(),
                jira.email.clone(),
                jira.api_token.clone(),
            )
        })
    }
}
