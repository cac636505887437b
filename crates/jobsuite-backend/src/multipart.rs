//! Multipart upload coordination endpoints.
//!
//! The backend owns the S3 multipart session; these calls only initiate it,
//! hand out per-part presigned URLs, and complete or abort it. The actual
//! part PUTs go straight to object storage (see `jobsuite-uploads`).

use jobsuite_core::responses::{CompleteMultipartRequest, PresignedUrlResponse};
use serde_json::Value;

use crate::{BackendClient, error::BackendError, http::check_response};

impl BackendClient {
    /// Initiate a multipart upload. The upstream takes multipart/form-data
    /// with `filename`, `content_type`, and `resource_type`, and answers with
    /// the created resource record.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport failure or a non-success status.
    pub async fn initiate_multipart(
        &self,
        token: &str,
        contractor_id: &str,
        estimate_id: &str,
        filename: &str,
        content_type: &str,
        resource_type: &str,
    ) -> Result<Value, BackendError> {
        let url = self.contractor_url(
            contractor_id,
            &format!("estimates/{estimate_id}/resources/multipart/initiate"),
        );
        let form = reqwest::multipart::Form::new()
            .text("filename", filename.to_string())
            .text("content_type", content_type.to_string())
            .text("resource_type", resource_type.to_string());
        let resp = self
            .http()
            .post(url)
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;
        let resp = check_response(resp, "Failed to initiate multipart upload").await?;
        Ok(resp.json().await?)
    }

    /// Get the presigned URL for one part.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport failure or a non-success status.
    pub async fn multipart_part_url(
        &self,
        token: &str,
        contractor_id: &str,
        estimate_id: &str,
        resource_id: &str,
        part_number: u32,
    ) -> Result<PresignedUrlResponse, BackendError> {
        let url = format!(
            "{}?part_number={part_number}",
            self.contractor_url(
                contractor_id,
                &format!(
                    "estimates/{estimate_id}/resources/{resource_id}/multipart/presigned-url"
                ),
            )
        );
        let resp = self.http().get(url).bearer_auth(token).send().await?;
        let resp = check_response(resp, "Failed to get presigned URL").await?;
        Ok(resp.json().await?)
    }

    /// Complete a multipart upload with the collected part ETags.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport failure or a non-success status.
    pub async fn complete_multipart(
        &self,
        token: &str,
        contractor_id: &str,
        estimate_id: &str,
        resource_id: &str,
        parts: &CompleteMultipartRequest,
    ) -> Result<Value, BackendError> {
        let url = self.contractor_url(
            contractor_id,
            &format!("estimates/{estimate_id}/resources/{resource_id}/multipart/complete"),
        );
        let resp = self
            .http()
            .post(url)
            .bearer_auth(token)
            .json(parts)
            .send()
            .await?;
        let resp = check_response(resp, "Failed to complete multipart upload").await?;
        Ok(resp.json().await.unwrap_or(Value::Null))
    }

    /// Abort a multipart upload so S3 drops the stored parts.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport failure or a non-success status.
    pub async fn abort_multipart(
        &self,
        token: &str,
        contractor_id: &str,
        estimate_id: &str,
        resource_id: &str,
    ) -> Result<Value, BackendError> {
        let url = self.contractor_url(
            contractor_id,
            &format!("estimates/{estimate_id}/resources/{resource_id}/multipart/abort"),
        );
        let resp = self.http().post(url).bearer_auth(token).send().await?;
        let resp = check_response(resp, "Failed to abort multipart upload").await?;
        Ok(resp.json().await.unwrap_or(Value::Null))
    }

    /// Get a read presigned URL for an uploaded resource.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport failure or a non-success status.
    pub async fn resource_presigned_url(
        &self,
        token: &str,
        contractor_id: &str,
        estimate_id: &str,
        resource_id: &str,
    ) -> Result<Value, BackendError> {
        let url = self.contractor_url(
            contractor_id,
            &format!("estimates/{estimate_id}/resources/{resource_id}/presigned-url"),
        );
        let resp = self.http().get(url).bearer_auth(token).send().await?;
        let resp = check_response(resp, "Failed to get presigned URL").await?;
        Ok(resp.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use jobsuite_core::responses::CompletedPart;
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn initiate_sends_form_fields() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock(
                "POST",
                "/api/v1/contractors/c-1/estimates/e-1/resources/multipart/initiate",
            )
            .match_header(
                "content-type",
                mockito::Matcher::Regex("multipart/form-data.*".into()),
            )
            .with_status(201)
            .with_body(r#"{"id": "res-1", "resource_type": "VIDEO", "upload_status": "PENDING"}"#)
            .create_async()
            .await;

        let client = BackendClient::new(server.url());
        let resource = client
            .initiate_multipart("tok", "c-1", "e-1", "walkthrough.mp4", "video/mp4", "VIDEO")
            .await
            .expect("initiate");
        assert_eq!(resource["id"], "res-1");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn part_url_includes_part_number() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock(
                "GET",
                "/api/v1/contractors/c-1/estimates/e-1/resources/res-1/multipart/presigned-url?part_number=3",
            )
            .with_body(r#"{"presigned_url": "https://bucket.s3.amazonaws.com/part3"}"#)
            .create_async()
            .await;

        let client = BackendClient::new(server.url());
        let resp = client
            .multipart_part_url("tok", "c-1", "e-1", "res-1", 3)
            .await
            .expect("presign");
        assert_eq!(resp.presigned_url, "https://bucket.s3.amazonaws.com/part3");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn complete_posts_parts_in_s3_casing() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock(
                "POST",
                "/api/v1/contractors/c-1/estimates/e-1/resources/res-1/multipart/complete",
            )
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "parts": [{"PartNumber": 1, "ETag": "abc"}]
            })))
            .with_body(r#"{"id": "res-1", "upload_status": "COMPLETED"}"#)
            .create_async()
            .await;

        let client = BackendClient::new(server.url());
        let parts = CompleteMultipartRequest {
            parts: vec![CompletedPart {
                part_number: 1,
                etag: "abc".into(),
            }],
        };
        client
            .complete_multipart("tok", "c-1", "e-1", "res-1", &parts)
            .await
            .expect("complete");
        mock.assert_async().await;
    }
}
