//! Cloudinary image storage adapter.
//!
//! Uses signed uploads: the request parameters (excluding `file` and
//! `api_key`) are sorted, joined as `k=v&k=v`, suffixed with the API secret
//! and hashed with SHA-256.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::domain::foundation::Timestamp;
use crate::ports::{ImageStorage, ImageUpload, StorageError, StoredImage};

#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: SecretString,
    pub folder: String,
    pub api_base_url: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

pub struct CloudinaryImageStorage {
    config: CloudinaryConfig,
    http_client: reqwest::Client,
}

impl CloudinaryImageStorage {
    pub fn new(config: CloudinaryConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "{}/{}/image/{}",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.cloud_name,
            action
        )
    }

    /// Signature over the given parameters. Order of `params` does not matter.
    fn sign(&self, params: &[(&str, &str)]) -> String {
        let mut sorted = params.to_vec();
        sorted.sort_by(|a, b| a.0.cmp(b.0));
        let joined = sorted
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        let mut hasher = Sha256::new();
        hasher.update(joined.as_bytes());
        hasher.update(self.config.api_secret.expose_secret().as_bytes());
        hex::encode(hasher.finalize())
    }

    async fn error_from(response: reqwest::Response) -> StorageError {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        tracing::error!(status = %status, error = %error_text, "Cloudinary request failed");
        if status.is_server_error() {
            StorageError::Unavailable(format!("Cloudinary returned {}", status))
        } else {
            StorageError::Rejected(error_text)
        }
    }
}

#[async_trait]
impl ImageStorage for CloudinaryImageStorage {
    async fn upload(&self, image: ImageUpload) -> Result<StoredImage, StorageError> {
        let timestamp = Timestamp::now().as_unix_secs().to_string();
        let signature = self.sign(&[
            ("folder", self.config.folder.as_str()),
            ("public_id", image.key.as_str()),
            ("timestamp", timestamp.as_str()),
        ]);

        let file = Part::bytes(image.bytes)
            .file_name(format!("{}.{}", image.key, image.extension))
            .mime_str(&image.content_type)
            .map_err(|e| StorageError::Rejected(format!("invalid content type: {}", e)))?;

        let form = Form::new()
            .part("file", file)
            .text("api_key", self.config.api_key.clone())
            .text("folder", self.config.folder.clone())
            .text("public_id", image.key)
            .text("timestamp", timestamp)
            .text("signature", signature)
            .text("signature_algorithm", "sha256");

        let response = self
            .http_client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| StorageError::Unavailable(format!("unexpected response: {}", e)))?;

        Ok(StoredImage {
            url: body.secure_url,
            public_id: body.public_id,
        })
    }

    async fn delete(&self, public_id: &str) -> Result<(), StorageError> {
        let timestamp = Timestamp::now().as_unix_secs().to_string();
        let signature = self.sign(&[("public_id", public_id), ("timestamp", timestamp.as_str())]);

        let params = [
            ("api_key", self.config.api_key.as_str()),
            ("public_id", public_id),
            ("timestamp", timestamp.as_str()),
            ("signature", signature.as_str()),
            ("signature_algorithm", "sha256"),
        ];

        let response = self
            .http_client
            .post(self.endpoint("destroy"))
            .form(&params)
            .send()
            .await
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let body: DestroyResponse = response
            .json()
            .await
            .map_err(|e| StorageError::Unavailable(format!("unexpected response: {}", e)))?;
        match body.result.as_str() {
            "ok" | "not found" => Ok(()),
            other => Err(StorageError::Rejected(format!("destroy returned {}", other))),
        }
    }
}

impl std::fmt::Debug for CloudinaryImageStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinaryImageStorage")
            .field("cloud_name", &self.config.cloud_name)
            .field("folder", &self.config.folder)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> CloudinaryImageStorage {
        CloudinaryImageStorage::new(CloudinaryConfig {
            cloud_name: "demo".to_string(),
            api_key: "1234".to_string(),
            api_secret: SecretString::new("abcd".to_string()),
            folder: "avatars".to_string(),
            api_base_url: "https://api.cloudinary.com/v1_1/".to_string(),
        })
    }

    #[test]
    fn endpoint_includes_cloud_name() {
        assert_eq!(
            storage().endpoint("upload"),
            "https://api.cloudinary.com/v1_1/demo/image/upload"
        );
    }

    #[test]
    fn signature_sorts_params_and_appends_secret() {
        let storage = storage();
        let expected = hex::encode(Sha256::digest(b"folder=avatars&timestamp=100abcd"));

        assert_eq!(
            storage.sign(&[("timestamp", "100"), ("folder", "avatars")]),
            expected
        );
        assert_eq!(
            storage.sign(&[("folder", "avatars"), ("timestamp", "100")]),
            expected
        );
    }

    #[test]
    fn debug_hides_secret() {
        assert!(!format!("{:?}", storage()).contains("abcd"));
    }
}
