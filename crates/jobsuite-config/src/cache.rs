//! Client-side cache tuning.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

const fn default_expiration_secs() -> u64 {
    600
}

const fn default_tick_secs() -> u64 {
    60
}

const fn default_activity_window_secs() -> u64 {
    300
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Age after which a cached slice is considered stale (seconds).
    #[serde(default = "default_expiration_secs")]
    pub expiration_secs: u64,

    /// Background refresh check interval (seconds).
    #[serde(default = "default_tick_secs")]
    pub tick_secs: u64,

    /// Trailing window within which the user counts as active (seconds).
    #[serde(default = "default_activity_window_secs")]
    pub activity_window_secs: u64,

    /// Snapshot directory. Empty means `~/.jobsuite/cache`.
    #[serde(default)]
    pub dir: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            expiration_secs: default_expiration_secs(),
            tick_secs: default_tick_secs(),
            activity_window_secs: default_activity_window_secs(),
            dir: String::new(),
        }
    }
}

impl CacheConfig {
    #[must_use]
    pub const fn expiration(&self) -> Duration {
        Duration::from_secs(self.expiration_secs)
    }

    #[must_use]
    pub const fn tick(&self) -> Duration {
        Duration::from_secs(self.tick_secs)
    }

    #[must_use]
    pub const fn activity_window(&self) -> Duration {
        Duration::from_secs(self.activity_window_secs)
    }

    /// Resolve the snapshot directory, falling back to `~/.jobsuite/cache`
    /// (or a relative `.jobsuite/cache` when no home directory exists).
    #[must_use]
    pub fn cache_dir(&self) -> PathBuf {
        if !self.dir.is_empty() {
            return PathBuf::from(&self.dir);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".jobsuite")
            .join("cache")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_match_refresh_contract() {
        let config = CacheConfig::default();
        assert_eq!(config.expiration(), Duration::from_secs(600));
        assert_eq!(config.tick(), Duration::from_secs(60));
        assert_eq!(config.activity_window(), Duration::from_secs(300));
    }

    #[test]
    fn explicit_dir_is_used_verbatim() {
        let config = CacheConfig {
            dir: "/tmp/jobsuite-test-cache".into(),
            ..CacheConfig::default()
        };
        assert_eq!(config.cache_dir(), PathBuf::from("/tmp/jobsuite-test-cache"));
    }

    #[test]
    fn default_dir_is_under_home() {
        let config = CacheConfig::default();
        assert!(config.cache_dir().ends_with(".jobsuite/cache"));
    }
}
