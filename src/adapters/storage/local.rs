//! Local filesystem image storage.
//!
//! Files land in `{base_dir}/{key}.{ext}` and are served by the HTTP layer
//! under the configured public URL prefix.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::ports::{ImageStorage, ImageUpload, StorageError, StoredImage};

pub struct LocalImageStorage {
    base_dir: PathBuf,
    public_base_url: String,
}

impl LocalImageStorage {
    pub fn new(base_dir: impl AsRef<Path>, public_base_url: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Keys are generated server-side, but reject anything path-like anyway.
    fn file_name(public_id: &str) -> Result<&str, StorageError> {
        let valid = !public_id.is_empty()
            && public_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !public_id.starts_with('.');
        if valid {
            Ok(public_id)
        } else {
            Err(StorageError::Rejected(format!("invalid storage key: {}", public_id)))
        }
    }
}

#[async_trait]
impl ImageStorage for LocalImageStorage {
    async fn upload(&self, image: ImageUpload) -> Result<StoredImage, StorageError> {
        let public_id = format!("{}.{}", image.key, image.extension);
        let file_name = Self::file_name(&public_id)?;

        fs::create_dir_all(&self.base_dir)
            .await
            .map_err(|e| StorageError::Io(format!("Failed to create directory: {}", e)))?;

        let path = self.base_dir.join(file_name);
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &image.bytes)
            .await
            .map_err(|e| StorageError::Io(format!("Failed to write temporary file: {}", e)))?;
        fs::rename(&temp_path, &path)
            .await
            .map_err(|e| StorageError::Io(format!("Failed to rename file: {}", e)))?;

        Ok(StoredImage {
            url: format!("{}/{}", self.public_base_url, file_name),
            public_id,
        })
    }

    async fn delete(&self, public_id: &str) -> Result<(), StorageError> {
        let path = self.base_dir.join(Self::file_name(public_id)?);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(format!("Failed to delete file: {}", e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn upload(key: &str) -> ImageUpload {
        ImageUpload {
            key: key.to_string(),
            content_type: "image/png".to_string(),
            extension: "png",
            bytes: vec![0x89, b'P', b'N', b'G', 1, 2, 3],
        }
    }

    #[tokio::test]
    async fn upload_writes_file_and_returns_public_url() {
        let dir = TempDir::new().unwrap();
        let storage = LocalImageStorage::new(dir.path(), "http://localhost:8080/uploads/");

        let stored = storage.upload(upload("avatar-1")).await.unwrap();

        assert_eq!(stored.public_id, "avatar-1.png");
        assert_eq!(stored.url, "http://localhost:8080/uploads/avatar-1.png");
        let on_disk = std::fs::read(dir.path().join("avatar-1.png")).unwrap();
        assert_eq!(on_disk.len(), 7);
        assert!(!dir.path().join("avatar-1.tmp").exists());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let storage = LocalImageStorage::new(dir.path(), "http://localhost/uploads");
        let stored = storage.upload(upload("avatar-2")).await.unwrap();

        storage.delete(&stored.public_id).await.unwrap();
        storage.delete(&stored.public_id).await.unwrap();
        assert!(!dir.path().join("avatar-2.png").exists());
    }

    #[tokio::test]
    async fn path_traversal_is_rejected() {
        let dir = TempDir::new().unwrap();
        let storage = LocalImageStorage::new(dir.path(), "http://localhost/uploads");

        assert!(matches!(
            storage.upload(upload("../escape")).await,
            Err(StorageError::Rejected(_))
        ));
        assert!(storage.delete("../etc/passwd").await.is_err());
    }
}
