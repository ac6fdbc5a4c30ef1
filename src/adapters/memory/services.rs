//! Recording doubles for outbound services.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{
    EmailError, EmailMessage, EmailSender, ImageStorage, ImageUpload, StorageError, StoredImage,
};

/// Keeps every message instead of sending it.
#[derive(Debug, Clone, Default)]
pub struct RecordingEmailSender {
    sent: Arc<RwLock<Vec<EmailMessage>>>,
    fail_with: Arc<RwLock<Option<EmailError>>>,
}

impl RecordingEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent send fail with `error`.
    pub async fn fail_with(&self, error: EmailError) {
        *self.fail_with.write().await = Some(error);
    }

    pub async fn sent(&self) -> Vec<EmailMessage> {
        self.sent.read().await.clone()
    }

    pub async fn last(&self) -> Option<EmailMessage> {
        self.sent.read().await.last().cloned()
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailError> {
        if let Some(error) = self.fail_with.read().await.clone() {
            return Err(error);
        }
        self.sent.write().await.push(message.clone());
        Ok(())
    }
}

/// Keeps uploaded images in memory and hands out fake URLs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryImageStorage {
    images: Arc<RwLock<Vec<(StoredImage, ImageUpload)>>>,
}

impl InMemoryImageStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.images.read().await.len()
    }

    pub async fn get(&self, public_id: &str) -> Option<ImageUpload> {
        self.images
            .read()
            .await
            .iter()
            .find(|(stored, _)| stored.public_id == public_id)
            .map(|(_, upload)| upload.clone())
    }
}

#[async_trait]
impl ImageStorage for InMemoryImageStorage {
    async fn upload(&self, image: ImageUpload) -> Result<StoredImage, StorageError> {
        let public_id = format!("{}.{}", image.key, image.extension);
        let stored = StoredImage {
            url: format!("https://images.test/{}", public_id),
            public_id,
        };
        self.images.write().await.push((stored.clone(), image));
        Ok(stored)
    }

    async fn delete(&self, public_id: &str) -> Result<(), StorageError> {
        self.images
            .write()
            .await
            .retain(|(stored, _)| stored.public_id != public_id);
        Ok(())
    }
}
