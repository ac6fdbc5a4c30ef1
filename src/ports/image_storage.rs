//! Image storage port for uploaded profile pictures.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// An image that has passed upload validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Storage key without extension, unique per upload.
    pub key: String,
    pub content_type: String,
    pub extension: &'static str,
    pub bytes: Vec<u8>,
}

/// Where a stored image can be fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub url: String,
    pub public_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("upload rejected: {0}")]
    Rejected(String),

    #[error("storage service unavailable: {0}")]
    Unavailable(String),
}

impl From<StorageError> for DomainError {
    fn from(err: StorageError) -> Self {
        let code = match err {
            StorageError::Io(_) => ErrorCode::InternalError,
            StorageError::Rejected(_) => ErrorCode::InvalidFile,
            StorageError::Unavailable(_) => ErrorCode::ExternalServiceError,
        };
        DomainError::new(code, err.to_string())
    }
}

#[async_trait]
pub trait ImageStorage: Send + Sync {
    async fn upload(&self, image: ImageUpload) -> Result<StoredImage, StorageError>;

    /// Removes a previously stored image. Missing images are not an error.
    async fn delete(&self, public_id: &str) -> Result<(), StorageError>;
}
