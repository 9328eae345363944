//! Error types for storage gateway operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Bucket not found: {0}")]
    BucketNotFound(String),

    #[error("Bucket already exists: {0}")]
    BucketAlreadyExists(String),

    #[error("Bucket is not empty: {0}")]
    BucketNotEmpty(String),

    #[error("Object not found: {0}/{1}")]
    ObjectNotFound(String, String),

    #[error("Storage client error: {0}")]
    Client(String),
}

impl StorageError {
    pub fn http_status_code(&self) -> u16 {
        match self {
            StorageError::BucketNotFound(_) => 404,
            StorageError::ObjectNotFound(_, _) => 404,
            StorageError::BucketAlreadyExists(_) => 409,
            StorageError::BucketNotEmpty(_) => 409,
            StorageError::Client(_) => 502,
        }
    }
}
