//! # jobsuite-config
//!
//! Layered configuration loading for JobSuite using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`JOBSUITE_*` prefix, `__` as separator)
//! 2. Project-level `./jobsuite.toml`
//! 3. User-level `~/.jobsuite/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `JOBSUITE_BACKEND__ENVIRONMENT` -> `backend.environment`,
//! `JOBSUITE_AWS__IMAGE_BUCKET` -> `aws.image_bucket`, etc. The `__` (double
//! underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use jobsuite_config::JobsuiteConfig;
//!
//! // Load from all sources (dotenvy + TOML + env):
//! let config = JobsuiteConfig::load_with_dotenv().expect("config");
//!
//! println!("backend: {}", config.backend.resolved_base_url());
//! ```

mod auth;
mod aws;
mod backend;
mod cache;
mod error;
mod gateway;
mod jira;

pub use auth::AuthConfig;
pub use aws::AwsConfig;
pub use backend::BackendConfig;
pub use cache::CacheConfig;
pub use error::ConfigError;
pub use gateway::GatewayConfig;
pub use jira::JiraConfig;

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct JobsuiteConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub aws: AwsConfig,
    #[serde(default)]
    pub jira: JiraConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

impl JobsuiteConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Extraction`] if a source fails to parse or merge.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment(None).extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Loads a `.env` found by walking up from the current directory before
    /// building the figment. This is the typical entry point for the CLI.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Extraction`] if a source fails to parse or merge.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_upward();
        Self::load()
    }

    /// Load with an explicit TOML file replacing the default file layers.
    ///
    /// Environment variables still apply on top.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Extraction`] if a source fails to parse or merge.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::figment(Some(path))
            .extract()
            .map_err(ConfigError::from)
    }

    /// Load with dotted-key overrides applied last.
    ///
    /// Intended for tests and embedding, where mutating the process
    /// environment is undesirable:
    ///
    /// ```no_run
    /// # use jobsuite_config::JobsuiteConfig;
    /// let config = JobsuiteConfig::load_with_overrides(&[
    ///     ("backend.environment", "local"),
    ///     ("cache.tick_secs", "5"),
    /// ]).expect("config");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Extraction`] if a source fails to parse or merge.
    pub fn load_with_overrides(overrides: &[(&str, &str)]) -> Result<Self, ConfigError> {
        let mut figment = Self::figment(None);
        for (key, value) in overrides {
            figment = figment.merge(Serialized::default(key, value));
        }
        figment.extract().map_err(ConfigError::from)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add additional
    /// providers on top.
    #[must_use]
    pub fn figment(file_override: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = file_override {
            figment = figment.merge(Toml::file(path));
        } else {
            // Layer 1: user-global config
            if let Some(global_path) = Self::global_config_path() {
                if global_path.exists() {
                    figment = figment.merge(Toml::file(global_path));
                }
            }

            // Layer 2: project-local config
            let local_path = PathBuf::from("jobsuite.toml");
            if local_path.exists() {
                figment = figment.merge(Toml::file(local_path));
            }
        }

        // Layer 3: environment variables (highest priority)
        figment.merge(Env::prefixed("JOBSUITE_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".jobsuite").join("config.toml"))
    }

    /// Load `.env` by walking up from the current directory.
    ///
    /// Silently does nothing if no `.env` is found.
    fn load_dotenv_upward() {
        if let Ok(mut dir) = std::env::current_dir() {
            for _ in 0..4 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }
        let _ = dotenvy::dotenv();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_config_loads() {
        let config = JobsuiteConfig::default();
        assert!(!config.aws.is_configured());
        assert!(!config.jira.is_configured());
        assert!(!config.auth.is_configured());
        assert_eq!(config.cache.expiration_secs, 600);
    }

    #[test]
    fn env_vars_override_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("JOBSUITE_BACKEND__ENVIRONMENT", "production");
            jail.set_env("JOBSUITE_GATEWAY__PORT", "9001");

            let config: JobsuiteConfig = JobsuiteConfig::figment(None).extract()?;
            assert_eq!(config.backend.environment, "production");
            assert_eq!(config.gateway.port, 9001);
            assert_eq!(config.backend.resolved_base_url(), "https://api.jobsuite.app");
            Ok(())
        });
    }

    #[test]
    fn local_toml_layers_under_env() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "jobsuite.toml",
                r#"
                [backend]
                environment = "local"

                [cache]
                tick_secs = 5
                "#,
            )?;
            jail.set_env("JOBSUITE_CACHE__TICK_SECS", "15");

            let config: JobsuiteConfig = JobsuiteConfig::figment(None).extract()?;
            assert_eq!(config.backend.environment, "local");
            // Env beats the file.
            assert_eq!(config.cache.tick_secs, 15);
            Ok(())
        });
    }

    #[test]
    fn overrides_apply_last() {
        let config = JobsuiteConfig::load_with_overrides(&[
            ("backend.environment", "local"),
            ("aws.image_bucket", "test-images"),
        ])
        .expect("config");
        assert_eq!(config.backend.resolved_base_url(), "http://localhost:8000");
        assert_eq!(config.aws.image_bucket, "test-images");
    }
}
