//! SDK-backed remote store
//!
//! One trait method per remote call. The gateway depends on the trait, so
//! its existence-gating and delete semantics are testable without a live
//! endpoint; `S3RemoteStore` is the `aws_sdk_s3` implementation.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
use aws_sdk_s3::Client;

use crate::config::S3Config;
use crate::storage::error::StorageError;

/// One listed object: key, size, etag.
#[derive(Debug, Clone)]
pub struct ObjectSummary {
    pub key: String,
    pub size: i64,
    pub etag: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn bucket_exists(&self, bucket: &str) -> bool;
    async fn create_bucket(&self, bucket: &str) -> Result<(), StorageError>;
    async fn bucket_location(&self, bucket: &str) -> Option<String>;
    async fn list_buckets(&self) -> Result<Vec<String>, StorageError>;
    async fn list_objects(&self, bucket: &str) -> Result<Vec<ObjectSummary>, StorageError>;
    async fn delete_bucket(&self, bucket: &str) -> Result<(), StorageError>;
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: Option<String>,
    ) -> Result<(), StorageError>;
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError>;
    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), StorageError>;
}

pub struct S3RemoteStore {
    client: Client,
    region: String,
}

impl S3RemoteStore {
    /// Build a client from static credentials and a fixed region.
    ///
    /// A custom endpoint (MinIO, R2) switches the client to that URL;
    /// path-style addressing is opt-in for stores that need it.
    pub fn new(config: &S3Config) -> Self {
        let credentials = Credentials::new(
            config.access_key.clone(),
            config.secret_key.clone(),
            None,
            None,
            "static",
        );

        let mut builder = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .force_path_style(config.force_path_style);

        if let Some(ref endpoint) = config.endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        Self {
            client: Client::from_conf(builder.build()),
            region: config.region.clone(),
        }
    }
}

#[async_trait]
impl RemoteStore for S3RemoteStore {
    /// Any HeadBucket failure counts as absent.
    async fn bucket_exists(&self, bucket: &str) -> bool {
        self.client
            .head_bucket()
            .bucket(bucket)
            .send()
            .await
            .is_ok()
    }

    async fn create_bucket(&self, bucket: &str) -> Result<(), StorageError> {
        let mut request = self.client.create_bucket().bucket(bucket);

        // us-east-1 is the only region that must not carry a location
        // constraint in the create request.
        if self.region != "us-east-1" {
            let constraint = BucketLocationConstraint::from(self.region.as_str());
            let bucket_config = CreateBucketConfiguration::builder()
                .location_constraint(constraint)
                .build();
            request = request.create_bucket_configuration(bucket_config);
        }

        request
            .send()
            .await
            .map_err(|e| StorageError::Client(e.to_string()))?;
        Ok(())
    }

    /// An empty location constraint means us-east-1; callers decide the
    /// fallback, so empty is reported as None here.
    async fn bucket_location(&self, bucket: &str) -> Option<String> {
        self.client
            .get_bucket_location()
            .bucket(bucket)
            .send()
            .await
            .ok()
            .and_then(|out| out.location_constraint().map(|c| c.as_str().to_string()))
            .filter(|r| !r.is_empty())
    }

    async fn list_buckets(&self) -> Result<Vec<String>, StorageError> {
        let out = self
            .client
            .list_buckets()
            .send()
            .await
            .map_err(|e| StorageError::Client(e.to_string()))?;

        Ok(out
            .buckets()
            .iter()
            .filter_map(|b| b.name())
            .map(String::from)
            .collect())
    }

    async fn list_objects(&self, bucket: &str) -> Result<Vec<ObjectSummary>, StorageError> {
        let out = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| StorageError::Client(e.to_string()))?;

        Ok(out
            .contents()
            .iter()
            .map(|obj| ObjectSummary {
                key: obj.key().unwrap_or_default().to_string(),
                size: obj.size().unwrap_or(0),
                etag: obj.e_tag().unwrap_or_default().trim_matches('"').to_string(),
            })
            .collect())
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<(), StorageError> {
        self.client
            .delete_bucket()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| StorageError::Client(e.to_string()))?;
        Ok(())
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: Option<String>,
    ) -> Result<(), StorageError> {
        let content_length = data.len() as i64;

        let mut request = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_length(content_length)
            .body(ByteStream::from(data));

        if let Some(ct) = content_type {
            request = request.content_type(ct);
        }

        request
            .send()
            .await
            .map_err(|e| StorageError::Client(e.to_string()))?;
        Ok(())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError> {
        let out = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::Client(e.to_string()))?;

        let bytes = out
            .body
            .collect()
            .await
            .map_err(|e| StorageError::Client(e.to_string()))?
            .into_bytes();

        Ok(bytes.to_vec())
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::Client(e.to_string()))?;
        Ok(())
    }
}
