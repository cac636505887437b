//! Service-account credentials for password-grant login.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Service account email (the `username` of the password grant).
    #[serde(default)]
    pub email: String,

    /// Service account password.
    #[serde(default)]
    pub password: String,
}

impl AuthConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.email.is_empty() && !self.password.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        assert!(!AuthConfig::default().is_configured());
    }

    #[test]
    fn configured_requires_both_fields() {
        let config = AuthConfig {
            email: "svc@example.com".into(),
            password: String::new(),
        };
        assert!(!config.is_configured());

        let config = AuthConfig {
            email: "svc@example.com".into(),
            password: "hunter2".into(),
        };
        assert!(config.is_configured());
    }
}
