//! AWS credentials and bucket configuration for the upload flows.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AwsConfig {
    /// Access key used for presigned POST policy signing.
    #[serde(default)]
    pub access_key_id: String,

    /// Secret key used for presigned POST policy signing.
    #[serde(default)]
    pub secret_access_key: String,

    /// Explicit region. If empty, derived from the deployment environment.
    #[serde(default)]
    pub region: String,

    /// Bucket receiving image and PDF uploads.
    #[serde(default)]
    pub image_bucket: String,

    /// Bucket receiving video uploads.
    #[serde(default)]
    pub video_bucket: String,
}

impl AwsConfig {
    /// Whether the signing credentials are present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.access_key_id.is_empty() && !self.secret_access_key.is_empty()
    }

    /// Resolve the region: explicit config wins, otherwise production runs in
    /// us-east-1 and every other environment in us-west-2.
    #[must_use]
    pub fn resolved_region(&self, production: bool) -> String {
        if !self.region.is_empty() {
            return self.region.clone();
        }
        if production { "us-east-1" } else { "us-west-2" }.to_string()
    }

    /// Fallback image bucket for resources that predate the bucket/key
    /// columns on the resource record.
    #[must_use]
    pub fn default_image_bucket(production: bool) -> String {
        let env = if production { "prod" } else { "dev" };
        format!("jobsuite-resource-images-{env}")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn region_derived_from_environment() {
        let config = AwsConfig::default();
        assert_eq!(config.resolved_region(true), "us-east-1");
        assert_eq!(config.resolved_region(false), "us-west-2");
    }

    #[test]
    fn explicit_region_wins() {
        let config = AwsConfig {
            region: "eu-west-1".into(),
            ..AwsConfig::default()
        };
        assert_eq!(config.resolved_region(true), "eu-west-1");
    }

    #[test]
    fn default_image_bucket_tracks_environment() {
        assert_eq!(
            AwsConfig::default_image_bucket(true),
            "jobsuite-resource-images-prod"
        );
        assert_eq!(
            AwsConfig::default_image_bucket(false),
            "jobsuite-resource-images-dev"
        );
    }

    #[test]
    fn configured_requires_both_keys() {
        let config = AwsConfig {
            access_key_id: "AKIA123".into(),
            ..AwsConfig::default()
        };
        assert!(!config.is_configured());
    }
}
