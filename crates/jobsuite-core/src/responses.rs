//! Shared wire shapes used across the gateway, upload flows, and CLI output.
//!
//! Key casing matches the JSON the original clients expect: list payloads are
//! wrapped in `{"Items": […]}`, multipart parts use S3's `PartNumber`/`ETag`
//! spelling.

use serde::{Deserialize, Serialize};

/// List responses wrapped the way the frontend consumes them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemsEnvelope<T> {
    #[serde(rename = "Items")]
    pub items: Vec<T>,
}

impl<T> ItemsEnvelope<T> {
    #[must_use]
    pub const fn new(items: Vec<T>) -> Self {
        Self { items }
    }
}

/// A presigned POST policy: the form target plus the fields that must be
/// appended to the form ahead of the file part, in order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PresignedPost {
    pub url: String,
    pub fields: Vec<(String, String)>,
}

/// One completed part of a multipart upload, in S3's casing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletedPart {
    #[serde(rename = "PartNumber")]
    pub part_number: u32,
    #[serde(rename = "ETag")]
    pub etag: String,
}

/// Body of the multipart completion call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompleteMultipartRequest {
    pub parts: Vec<CompletedPart>,
}

/// Per-part presign response from the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PresignedUrlResponse {
    pub presigned_url: String,
}

/// Object-storage existence probe result.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExistsResponse {
    pub exists: bool,
}

/// Response of the Jira ticket route.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JiraTicketResponse {
    #[serde(rename = "jiraTicketUrl")]
    pub jira_ticket_url: String,
}

/// Body accepted by the log sink route.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogEvent {
    pub message: String,
    #[serde(rename = "logStream", default)]
    pub log_stream: Option<String>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn items_envelope_uses_capitalized_key() {
        let envelope = ItemsEnvelope::new(vec![1, 2, 3]);
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["Items"], serde_json::json!([1, 2, 3]));
    }

    #[test]
    fn completed_part_uses_s3_casing() {
        let part = CompletedPart {
            part_number: 4,
            etag: "abc123".to_string(),
        };
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(json["PartNumber"], 4);
        assert_eq!(json["ETag"], "abc123");
    }

    #[test]
    fn jira_response_camel_cases_url() {
        let resp = JiraTicketResponse {
            jira_ticket_url: "https://example.atlassian.net/browse/JOB-12".to_string(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"jiraTicketUrl\""));
    }
}
