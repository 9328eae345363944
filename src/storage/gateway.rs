//! S3 storage gateway
//!
//! Exposes the bucket and file operations served by the HTTP layer. Each
//! operation is an existence check followed by one remote call; content is
//! fully buffered in memory. The remote calls go through the `RemoteStore`
//! seam so the gating logic is testable.

use std::sync::Arc;

use uuid::Uuid;

use crate::config::S3Config;
use crate::models::FileUpload;
use crate::storage::error::StorageError;
use crate::storage::remote::{RemoteStore, S3RemoteStore};

pub struct S3Gateway {
    store: Arc<dyn RemoteStore>,
    region: String,
}

impl S3Gateway {
    pub fn new(config: &S3Config) -> Self {
        Self {
            store: Arc::new(S3RemoteStore::new(config)),
            region: config.region.clone(),
        }
    }

    #[cfg(test)]
    fn with_store(store: Arc<dyn RemoteStore>, region: String) -> Self {
        Self { store, region }
    }

    /// Whether the bucket is visible to the configured credentials.
    pub async fn bucket_exists(&self, bucket: &str) -> bool {
        self.store.bucket_exists(bucket).await
    }

    /// Create a bucket and return the region it resolved to.
    pub async fn create_bucket(&self, bucket: &str) -> Result<String, StorageError> {
        if self.store.bucket_exists(bucket).await {
            return Err(StorageError::BucketAlreadyExists(bucket.to_string()));
        }

        self.store.create_bucket(bucket).await?;
        tracing::info!("Bucket created: {}", bucket);

        // Verify by resolving the bucket location; the store reports None
        // for an empty constraint, so fall back to the configured region.
        let region = self
            .store
            .bucket_location(bucket)
            .await
            .unwrap_or_else(|| self.region.clone());

        Ok(region)
    }

    /// All bucket names visible to the configured credentials.
    pub async fn list_buckets(&self) -> Result<Vec<String>, StorageError> {
        self.store.list_buckets().await
    }

    /// List the objects in a bucket as file records (key, size, etag).
    pub async fn list_files(&self, bucket: &str) -> Result<Vec<FileUpload>, StorageError> {
        if !self.store.bucket_exists(bucket).await {
            tracing::error!("No bucket found: {}", bucket);
            return Err(StorageError::BucketNotFound(bucket.to_string()));
        }

        let objects = self.store.list_objects(bucket).await?;

        Ok(objects
            .into_iter()
            .map(|obj| FileUpload::new(obj.key, obj.size, obj.etag))
            .collect())
    }

    /// Delete the bucket only if it holds no objects.
    pub async fn soft_delete_bucket(&self, bucket: &str) -> Result<(), StorageError> {
        if !self.store.bucket_exists(bucket).await {
            tracing::error!("No bucket found: {}", bucket);
            return Err(StorageError::BucketNotFound(bucket.to_string()));
        }

        if !self.store.list_objects(bucket).await?.is_empty() {
            return Err(StorageError::BucketNotEmpty(bucket.to_string()));
        }

        self.store.delete_bucket(bucket).await?;
        tracing::info!("Bucket deleted: {}", bucket);
        Ok(())
    }

    /// Delete every listed object, one at a time. The bucket itself is
    /// left in place. Returns the number of objects removed; the first
    /// failing delete aborts the sweep.
    pub async fn hard_delete_bucket(&self, bucket: &str) -> Result<usize, StorageError> {
        if !self.store.bucket_exists(bucket).await {
            tracing::error!("No bucket found: {}", bucket);
            return Err(StorageError::BucketNotFound(bucket.to_string()));
        }

        let objects = self.store.list_objects(bucket).await?;

        let mut removed = 0;
        for obj in &objects {
            self.store.delete_object(bucket, &obj.key).await?;
            removed += 1;
        }

        tracing::info!("Emptied bucket {}: {} objects removed", bucket, removed);
        Ok(removed)
    }

    /// Store a file under a freshly generated unique key and return that key.
    pub async fn upload_file(
        &self,
        bucket: &str,
        file_name: &str,
        data: Vec<u8>,
        content_type: Option<String>,
    ) -> Result<String, StorageError> {
        if !self.store.bucket_exists(bucket).await {
            return Err(StorageError::BucketNotFound(bucket.to_string()));
        }

        let key = object_key(file_name);

        self.store
            .put_object(bucket, &key, data, content_type)
            .await
            .map_err(|e| {
                tracing::error!("File upload failed: bucket={}, key={}: {}", bucket, key, e);
                e
            })?;

        tracing::info!("File uploaded: bucket={}, key={}", bucket, key);
        Ok(key)
    }

    /// Fetch an object and buffer its entire content into the record.
    /// Any fetch failure, including no-such-key, maps to `ObjectNotFound`.
    pub async fn download_file(
        &self,
        bucket: &str,
        file_name: &str,
    ) -> Result<FileUpload, StorageError> {
        if !self.store.bucket_exists(bucket).await {
            tracing::error!("No bucket found: {}", bucket);
            return Err(StorageError::BucketNotFound(bucket.to_string()));
        }

        let bytes = self
            .store
            .get_object(bucket, file_name)
            .await
            .map_err(|_| {
                StorageError::ObjectNotFound(bucket.to_string(), file_name.to_string())
            })?;

        let mut record = FileUpload::new(
            file_name.to_string(),
            bytes.len() as i64,
            file_name.to_string(),
        );
        record.content = Some(bytes);
        Ok(record)
    }

    /// Delete a single named object.
    pub async fn delete_file(&self, bucket: &str, file_name: &str) -> Result<(), StorageError> {
        if !self.store.bucket_exists(bucket).await {
            tracing::error!("No bucket found: {}", bucket);
            return Err(StorageError::BucketNotFound(bucket.to_string()));
        }

        self.store.delete_object(bucket, file_name).await?;
        tracing::info!("File deleted: bucket={}, key={}", bucket, file_name);
        Ok(())
    }
}

/// Unique object key: random v4 prefix, original filename preserved.
fn object_key(file_name: &str) -> String {
    format!("{}{}", Uuid::new_v4(), file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::remote::{MockRemoteStore, ObjectSummary};

    fn gateway(store: MockRemoteStore) -> S3Gateway {
        S3Gateway::with_store(Arc::new(store), "ap-south-1".to_string())
    }

    fn summary(key: &str) -> ObjectSummary {
        ObjectSummary {
            key: key.to_string(),
            size: 10,
            etag: "etag".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_existing_bucket_issues_no_remote_mutation() {
        let mut store = MockRemoteStore::new();
        store.expect_bucket_exists().returning(|_| true);
        store.expect_create_bucket().times(0);

        let err = gateway(store).create_bucket("reports").await.unwrap_err();
        assert!(matches!(err, StorageError::BucketAlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_create_bucket_reports_resolved_region() {
        let mut store = MockRemoteStore::new();
        store.expect_bucket_exists().returning(|_| false);
        store.expect_create_bucket().times(1).returning(|_| Ok(()));
        store
            .expect_bucket_location()
            .returning(|_| Some("eu-west-2".to_string()));

        let region = gateway(store).create_bucket("reports").await.unwrap();
        assert_eq!(region, "eu-west-2");
    }

    #[tokio::test]
    async fn test_create_bucket_falls_back_to_configured_region() {
        let mut store = MockRemoteStore::new();
        store.expect_bucket_exists().returning(|_| false);
        store.expect_create_bucket().times(1).returning(|_| Ok(()));
        store.expect_bucket_location().returning(|_| None);

        let region = gateway(store).create_bucket("reports").await.unwrap();
        assert_eq!(region, "ap-south-1");
    }

    #[tokio::test]
    async fn test_upload_to_missing_bucket_performs_no_write() {
        let mut store = MockRemoteStore::new();
        store.expect_bucket_exists().returning(|_| false);
        store.expect_put_object().times(0);

        let err = gateway(store)
            .upload_file("missing", "data.csv", vec![1, 2, 3], None)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::BucketNotFound(_)));
    }

    #[tokio::test]
    async fn test_upload_key_is_prefixed_original_filename() {
        let mut store = MockRemoteStore::new();
        store.expect_bucket_exists().returning(|_| true);
        store
            .expect_put_object()
            .withf(|_, key, _, _| key.ends_with("data.csv"))
            .times(1)
            .returning(|_, _, _, _| Ok(()));

        let key = gateway(store)
            .upload_file("reports", "data.csv", vec![1, 2, 3], None)
            .await
            .unwrap();
        assert!(key.ends_with("data.csv"));
        assert!(key.len() > "data.csv".len());
    }

    #[tokio::test]
    async fn test_list_files_missing_bucket_maps_to_not_found() {
        let mut store = MockRemoteStore::new();
        store.expect_bucket_exists().returning(|_| false);
        store.expect_list_objects().times(0);

        let err = gateway(store).list_files("missing").await.unwrap_err();
        assert!(matches!(err, StorageError::BucketNotFound(_)));
        assert_eq!(err.http_status_code(), 404);
    }

    #[tokio::test]
    async fn test_hard_delete_removes_objects_but_never_the_bucket() {
        let mut store = MockRemoteStore::new();
        store.expect_bucket_exists().returning(|_| true);
        store
            .expect_list_objects()
            .returning(|_| Ok(vec![summary("a.txt"), summary("b.txt")]));
        store
            .expect_delete_object()
            .times(2)
            .returning(|_, _| Ok(()));
        store.expect_delete_bucket().times(0);

        let removed = gateway(store).hard_delete_bucket("reports").await.unwrap();
        assert_eq!(removed, 2);
    }

    #[tokio::test]
    async fn test_soft_delete_keeps_nonempty_bucket() {
        let mut store = MockRemoteStore::new();
        store.expect_bucket_exists().returning(|_| true);
        store
            .expect_list_objects()
            .returning(|_| Ok(vec![summary("a.txt")]));
        store.expect_delete_bucket().times(0);

        let err = gateway(store)
            .soft_delete_bucket("reports")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::BucketNotEmpty(_)));
    }

    #[tokio::test]
    async fn test_soft_delete_removes_empty_bucket() {
        let mut store = MockRemoteStore::new();
        store.expect_bucket_exists().returning(|_| true);
        store.expect_list_objects().returning(|_| Ok(vec![]));
        store.expect_delete_bucket().times(1).returning(|_| Ok(()));

        assert!(gateway(store).soft_delete_bucket("reports").await.is_ok());
    }

    #[tokio::test]
    async fn test_download_missing_object_maps_to_not_found() {
        let mut store = MockRemoteStore::new();
        store.expect_bucket_exists().returning(|_| true);
        store
            .expect_get_object()
            .returning(|_, _| Err(StorageError::Client("NoSuchKey".to_string())));

        let err = gateway(store)
            .download_file("reports", "missing.pdf")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::ObjectNotFound(_, _)));
        assert_eq!(err.http_status_code(), 404);
    }

    #[tokio::test]
    async fn test_download_buffers_full_content() {
        let mut store = MockRemoteStore::new();
        store.expect_bucket_exists().returning(|_| true);
        store
            .expect_get_object()
            .returning(|_, _| Ok(vec![1, 2, 3, 4]));

        let record = gateway(store)
            .download_file("reports", "q1.pdf")
            .await
            .unwrap();
        assert_eq!(record.content, Some(vec![1, 2, 3, 4]));
        assert_eq!(record.file_size, 4);
        assert_eq!(record.file_name, "q1.pdf");
    }

    #[test]
    fn test_object_key_keeps_original_name() {
        let key = object_key("report.pdf");
        assert!(key.ends_with("report.pdf"));
        assert!(key.len() > "report.pdf".len());
    }

    #[test]
    fn test_object_key_is_unique() {
        assert_ne!(object_key("a.txt"), object_key("a.txt"));
    }

    #[test]
    fn test_object_key_never_empty() {
        assert!(!object_key("").is_empty());
    }
}
