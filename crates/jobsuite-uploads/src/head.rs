//! S3 object existence probe.

use object_store::ObjectStore;
use object_store::aws::AmazonS3Builder;
use object_store::path::Path as ObjectPath;

use crate::error::UploadError;

/// HEAD `key` in `bucket`. `NotFound` maps to `Ok(false)`; every other
/// storage error propagates.
///
/// # Errors
///
/// Returns [`UploadError::Storage`] on non-NotFound storage failures.
pub async fn object_exists(
    store: &dyn ObjectStore,
    key: &str,
) -> Result<bool, UploadError> {
    match store.head(&ObjectPath::from(key)).await {
        Ok(_) => Ok(true),
        Err(object_store::Error::NotFound { .. }) => Ok(false),
        Err(error) => Err(error.into()),
    }
}

/// Build an S3 store handle for one bucket.
///
/// # Errors
///
/// Returns [`UploadError::Storage`] when the builder rejects the settings.
pub fn s3_store(
    bucket: &str,
    region: &str,
    access_key_id: &str,
    secret_access_key: &str,
) -> Result<impl ObjectStore + use<>, UploadError> {
    Ok(AmazonS3Builder::new()
        .with_bucket_name(bucket)
        .with_region(region)
        .with_access_key_id(access_key_id)
        .with_secret_access_key(secret_access_key)
        .build()?)
}

#[cfg(test)]
mod tests {
    use object_store::PutPayload;
    use object_store::memory::InMemory;

    use super::*;

    #[tokio::test]
    async fn present_object_exists() {
        let store = InMemory::new();
        store
            .put(&ObjectPath::from("est-1/photo.jpg"), PutPayload::from_static(b"jpeg"))
            .await
            .expect("put");
        assert!(object_exists(&store, "est-1/photo.jpg").await.expect("head"));
    }

    #[tokio::test]
    async fn missing_object_does_not_exist() {
        let store = InMemory::new();
        assert!(!object_exists(&store, "est-1/missing.jpg").await.expect("head"));
    }
}
