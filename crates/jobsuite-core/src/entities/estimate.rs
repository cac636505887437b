use serde::{Deserialize, Serialize};

use crate::enums::{EstimateStatus, EstimateType};

/// A bid on a job, from first lead contact through the project phase.
///
/// Listing endpoints add `client_name`; the enrichment fields
/// (`hours_worked`, `has_video`, …) are computed by detail fetches and merged
/// into cached copies without a full reload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Estimate {
    pub id: String,
    #[serde(default)]
    pub contractor_id: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub status: EstimateStatus,
    #[serde(default)]
    pub estimate_type: Option<EstimateType>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub client_name: Option<String>,

    #[serde(default)]
    pub hours_bid: Option<f64>,
    #[serde(default)]
    pub actual_hours: Option<f64>,
    #[serde(default)]
    pub hourly_rate: Option<f64>,
    #[serde(default)]
    pub discount_percentage: Option<f64>,
    #[serde(default)]
    pub discount_reason: Option<String>,
    #[serde(default)]
    pub tax_rate: Option<f64>,

    #[serde(default)]
    pub address_street: Option<String>,
    #[serde(default)]
    pub address_city: Option<String>,
    #[serde(default)]
    pub address_state: Option<String>,
    #[serde(default)]
    pub address_zipcode: Option<String>,
    #[serde(default)]
    pub address_country: Option<String>,

    #[serde(default)]
    pub transcription_summary: Option<String>,
    #[serde(default)]
    pub spanish_transcription: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default)]
    pub cover_photo_resource_id: Option<String>,
    #[serde(default)]
    pub jira_link: Option<String>,
    #[serde(default)]
    pub docuseal_link: Option<String>,

    #[serde(default)]
    pub needs_follow_up: Option<bool>,
    #[serde(default)]
    pub follow_up_count: Option<u32>,
    #[serde(default)]
    pub last_follow_up_at: Option<String>,
    #[serde(default)]
    pub next_follow_up_at: Option<String>,
    #[serde(default)]
    pub resurfaced_at: Option<String>,

    #[serde(default)]
    pub scheduled_date: Option<String>,
    #[serde(default)]
    pub sent_date: Option<String>,
    #[serde(default)]
    pub sold_date: Option<String>,
    #[serde(default)]
    pub started_date: Option<String>,
    #[serde(default)]
    pub finished_date: Option<String>,
    #[serde(default)]
    pub invoiced_date: Option<String>,
    #[serde(default)]
    pub payment_received_date: Option<String>,

    #[serde(default)]
    pub referral_source: Option<String>,
    #[serde(default)]
    pub referral_name: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub owned_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,

    // Enrichment fields merged from detail fetches.
    #[serde(default)]
    pub hours_worked: Option<f64>,
    #[serde(default)]
    pub has_video: Option<bool>,
    #[serde(default)]
    pub has_images: Option<bool>,
    #[serde(default)]
    pub has_files: Option<bool>,
    #[serde(default)]
    pub has_description: Option<bool>,
    #[serde(default)]
    pub has_spanish_transcription: Option<bool>,
    #[serde(default)]
    pub line_items_count: Option<u32>,
}

impl Estimate {
    /// Partial-merge enrichment data into this record, leaving untouched
    /// fields as they were.
    pub fn enrich(&mut self, data: &EstimateEnrichment) {
        if let Some(v) = data.hours_worked {
            self.hours_worked = Some(v);
        }
        if let Some(v) = data.has_video {
            self.has_video = Some(v);
        }
        if let Some(v) = data.has_images {
            self.has_images = Some(v);
        }
        if let Some(v) = data.has_files {
            self.has_files = Some(v);
        }
        if let Some(v) = data.has_description {
            self.has_description = Some(v);
        }
        if let Some(v) = data.has_spanish_transcription {
            self.has_spanish_transcription = Some(v);
        }
        if let Some(v) = data.line_items_count {
            self.line_items_count = Some(v);
        }
        if let Some(v) = data.status {
            self.status = v;
        }
        if let Some(ref v) = data.client_name {
            self.client_name = Some(v.clone());
        }
    }
}

/// Detail-derived fields merged into a cached estimate without replacing it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EstimateEnrichment {
    #[serde(default)]
    pub hours_worked: Option<f64>,
    #[serde(default)]
    pub has_video: Option<bool>,
    #[serde(default)]
    pub has_images: Option<bool>,
    #[serde(default)]
    pub has_files: Option<bool>,
    #[serde(default)]
    pub has_description: Option<bool>,
    #[serde(default)]
    pub has_spanish_transcription: Option<bool>,
    #[serde(default)]
    pub line_items_count: Option<u32>,
    #[serde(default)]
    pub status: Option<EstimateStatus>,
    #[serde(default)]
    pub client_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn deserializes_sparse_backend_record() {
        let json = r#"{
            "id": "est-001",
            "status": "ESTIMATE_SENT",
            "client_name": "Acme",
            "hourly_rate": 85.0
        }"#;
        let estimate: Estimate = serde_json::from_str(json).unwrap();
        assert_eq!(estimate.id, "est-001");
        assert_eq!(estimate.status, EstimateStatus::EstimateSent);
        assert_eq!(estimate.client_name.as_deref(), Some("Acme"));
        assert_eq!(estimate.hourly_rate, Some(85.0));
        assert_eq!(estimate.notes, None);
    }

    #[test]
    fn enrich_merges_only_present_fields() {
        let mut estimate = Estimate {
            id: "est-002".to_string(),
            status: EstimateStatus::EstimateScheduled,
            hours_worked: Some(4.0),
            ..Estimate::default()
        };

        estimate.enrich(&EstimateEnrichment {
            has_video: Some(true),
            line_items_count: Some(3),
            ..EstimateEnrichment::default()
        });

        assert_eq!(estimate.has_video, Some(true));
        assert_eq!(estimate.line_items_count, Some(3));
        // Untouched by the partial payload.
        assert_eq!(estimate.hours_worked, Some(4.0));
        assert_eq!(estimate.status, EstimateStatus::EstimateScheduled);
    }
}
