//! Upstream backend API configuration.

use serde::{Deserialize, Serialize};

const PRODUCTION_URL: &str = "https://api.jobsuite.app";
const QA_URL: &str = "https://qa.api.jobsuite.app";
const LOCAL_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Deployment environment name: `production`, `prod`, `qa`, `main`,
    /// `staging`, `local`, or anything else (treated as QA).
    #[serde(default)]
    pub environment: String,

    /// Explicit base URL. Takes precedence over `environment` when set.
    #[serde(default)]
    pub base_url: String,
}

impl BackendConfig {
    /// Whether this config points at the production backend.
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self.environment.as_str(), "production" | "prod")
    }

    /// Resolve the backend base URL.
    ///
    /// An explicit `base_url` wins. Otherwise `production`/`prod` map to the
    /// production API, `local` to a localhost backend, and every other value
    /// (qa, main, staging, unknown) to QA. Defaulting to QA is deliberate:
    /// an unrecognized environment must never hit production.
    #[must_use]
    pub fn resolved_base_url(&self) -> String {
        if !self.base_url.is_empty() {
            return self.base_url.trim_end_matches('/').to_string();
        }
        match self.environment.as_str() {
            "production" | "prod" => PRODUCTION_URL.to_string(),
            "local" => LOCAL_URL.to_string(),
            _ => QA_URL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn production_branches_resolve_to_prod() {
        for env in ["production", "prod"] {
            let config = BackendConfig {
                environment: env.into(),
                base_url: String::new(),
            };
            assert_eq!(config.resolved_base_url(), "https://api.jobsuite.app");
            assert!(config.is_production());
        }
    }

    #[test]
    fn unknown_environment_defaults_to_qa() {
        for env in ["", "qa", "main", "staging", "feature-x"] {
            let config = BackendConfig {
                environment: env.into(),
                base_url: String::new(),
            };
            assert_eq!(config.resolved_base_url(), "https://qa.api.jobsuite.app");
            assert!(!config.is_production());
        }
    }

    #[test]
    fn local_environment_uses_localhost() {
        let config = BackendConfig {
            environment: "local".into(),
            base_url: String::new(),
        };
        assert_eq!(config.resolved_base_url(), "http://localhost:8000");
    }

    #[test]
    fn explicit_base_url_wins() {
        let config = BackendConfig {
            environment: "production".into(),
            base_url: "http://127.0.0.1:9999/".into(),
        };
        assert_eq!(config.resolved_base_url(), "http://127.0.0.1:9999");
    }
}
