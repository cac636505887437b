use serde::{Deserialize, Serialize};

use crate::enums::{ResourceType, UploadStatus};

/// An uploaded media record (image/video/pdf) referencing its object-storage
/// location. Created by the initiate step of an upload; `s3_key`/`s3_bucket`
/// are filled in once the upload completes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EstimateResource {
    pub id: String,
    #[serde(default)]
    pub contractor_id: Option<String>,
    #[serde(default)]
    pub estimate_id: Option<String>,
    pub resource_type: ResourceType,
    #[serde(default)]
    pub upload_status: Option<UploadStatus>,
    #[serde(default)]
    pub upload_progress: Option<f64>,
    #[serde(default)]
    pub resource_location: Option<String>,
    #[serde(default)]
    pub s3_key: Option<String>,
    #[serde(default)]
    pub s3_bucket: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}
