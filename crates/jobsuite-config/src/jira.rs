//! Jira integration configuration.

use serde::{Deserialize, Serialize};

fn default_issue_type() -> String {
    String::from("Task")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JiraConfig {
    /// Jira site base URL (e.g. `https://example.atlassian.net`).
    #[serde(default)]
    pub base_url: String,

    /// Account email for basic auth.
    #[serde(default)]
    pub email: String,

    /// API token paired with the email.
    #[serde(default)]
    pub api_token: String,

    /// Project key new issues are filed under.
    #[serde(default)]
    pub project_key: String,

    /// Issue type name.
    #[serde(default = "default_issue_type")]
    pub issue_type: String,
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            email: String::new(),
            api_token: String::new(),
            project_key: String::new(),
            issue_type: default_issue_type(),
        }
    }
}

impl JiraConfig {
    /// Check that every field the issue-creation call needs is present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty()
            && !self.email.is_empty()
            && !self.api_token.is_empty()
            && !self.project_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = JiraConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.issue_type, "Task");
    }

    #[test]
    fn configured_when_all_fields_set() {
        let config = JiraConfig {
            base_url: "https://example.atlassian.net".into(),
            email: "ops@example.com".into(),
            api_token: "token".into(),
            project_key: "JOB".into(),
            issue_type: default_issue_type(),
        };
        assert!(config.is_configured());
    }
}
