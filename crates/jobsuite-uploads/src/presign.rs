//! SigV4 presigned POST policy signing.
//!
//! The gateway signs the policy; clients POST the form straight to the
//! bucket, so the AWS secret never leaves the server.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use jobsuite_config::AwsConfig;
use jobsuite_core::responses::PresignedPost;
use serde_json::json;
use sha2::Sha256;

use crate::error::UploadError;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";
const ACL: &str = "public-read";

/// Size/expiry caps per upload class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimits {
    pub max_bytes: u64,
    pub expires_secs: i64,
}

impl UploadLimits {
    /// Images: 150 MiB, 10 minute policy.
    pub const IMAGE: Self = Self {
        max_bytes: 150 * 1024 * 1024,
        expires_secs: 600,
    };

    /// Videos: 1 GiB, policy slightly longer than the image window.
    pub const VIDEO: Self = Self {
        max_bytes: 1024 * 1024 * 1024,
        expires_secs: 700,
    };
}

/// Signs browser-style presigned POST policies for one bucket/region.
#[derive(Debug, Clone)]
pub struct PostPolicySigner {
    access_key_id: String,
    secret_access_key: String,
    region: String,
}

impl PostPolicySigner {
    /// Build a signer from AWS config.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::MissingCredentials`] when either key is absent.
    pub fn from_config(aws: &AwsConfig, production: bool) -> Result<Self, UploadError> {
        if !aws.is_configured() {
            return Err(UploadError::MissingCredentials(
                "aws.access_key_id and aws.secret_access_key must both be set".into(),
            ));
        }
        Ok(Self {
            access_key_id: aws.access_key_id.clone(),
            secret_access_key: aws.secret_access_key.clone(),
            region: aws.resolved_region(production),
        })
    }

    #[must_use]
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            region: region.into(),
        }
    }

    /// Sign a POST policy for `key` in `bucket`, valid from now.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError`] when policy serialization fails.
    pub fn presign(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        limits: UploadLimits,
    ) -> Result<PresignedPost, UploadError> {
        self.presign_at(bucket, key, content_type, limits, Utc::now())
    }

    /// Sign with an explicit signing instant. Exposed for deterministic
    /// signature checks.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError`] when policy serialization fails.
    pub fn presign_at(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        limits: UploadLimits,
        now: DateTime<Utc>,
    ) -> Result<PresignedPost, UploadError> {
        let date_stamp = now.format("%Y%m%d").to_string();
        let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
        let credential = format!(
            "{}/{date_stamp}/{}/s3/aws4_request",
            self.access_key_id, self.region
        );
        let expiration = (now + Duration::seconds(limits.expires_secs))
            .format("%Y-%m-%dT%H:%M:%SZ")
            .to_string();

        let policy = json!({
            "expiration": expiration,
            "conditions": [
                {"bucket": bucket},
                {"key": key},
                {"acl": ACL},
                ["starts-with", "$Content-Type", content_type],
                ["content-length-range", 0, limits.max_bytes],
                {"x-amz-algorithm": ALGORITHM},
                {"x-amz-credential": credential},
                {"x-amz-date": amz_date},
            ],
        });
        let policy_b64 = STANDARD.encode(serde_json::to_vec(&policy).map_err(|e| {
            UploadError::MissingCredentials(format!("policy serialization failed: {e}"))
        })?);

        let signing_key = self.derive_key(&date_stamp);
        let signature = hex(&hmac(&signing_key, policy_b64.as_bytes()));

        Ok(PresignedPost {
            url: format!("https://{bucket}.s3.{}.amazonaws.com", self.region),
            fields: vec![
                ("key".into(), key.into()),
                ("acl".into(), ACL.into()),
                ("Content-Type".into(), content_type.into()),
                ("x-amz-algorithm".into(), ALGORITHM.into()),
                ("x-amz-credential".into(), credential),
                ("x-amz-date".into(), amz_date),
                ("policy".into(), policy_b64),
                ("x-amz-signature".into(), signature),
            ],
        })
    }

    fn derive_key(&self, date_stamp: &str) -> Vec<u8> {
        let k_date = hmac(
            format!("AWS4{}", self.secret_access_key).as_bytes(),
            date_stamp.as_bytes(),
        );
        let k_region = hmac(&k_date, self.region.as_bytes());
        let k_service = hmac(&k_region, b"s3");
        hmac(&k_service, b"aws4_request")
    }
}

fn hmac(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).unwrap_or_else(|_| {
        // HMAC-SHA256 accepts keys of any length.
        unreachable!("HMAC accepts any key length")
    });
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
