//! UploadProfileImageHandler - Validates and stores a profile picture.
//!
//! The declared content type must be one of the accepted image types and the
//! file's leading bytes must carry that type's signature.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::{ImageStorage, ImageUpload, UserRepository};

use super::load_user;

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// A file as received from the client, before validation.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub declared_type: Option<String>,
    pub bytes: Vec<u8>,
}

fn invalid_file(message: &str) -> DomainError {
    DomainError::new(ErrorCode::InvalidFile, message)
}

fn signature_matches(content_type: &str, bytes: &[u8]) -> bool {
    match content_type {
        "image/jpeg" => bytes.starts_with(&[0xFF, 0xD8, 0xFF]),
        "image/png" => bytes.starts_with(PNG_SIGNATURE),
        "image/webp" => bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP",
        _ => false,
    }
}

/// Checks size, declared type and signature. Returns the normalised content
/// type and file extension.
pub fn inspect_image(file: &ImageFile) -> Result<(String, &'static str), DomainError> {
    if file.bytes.is_empty() {
        return Err(invalid_file("File is empty"));
    }
    if file.bytes.len() > MAX_IMAGE_BYTES {
        return Err(invalid_file("File exceeds the 5 MB limit"));
    }

    let declared = file
        .declared_type
        .as_deref()
        .map(|t| t.split(';').next().unwrap_or(t).trim().to_ascii_lowercase())
        .ok_or_else(|| invalid_file("File type is required"))?;
    let extension = match declared.as_str() {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/png" => "png",
        "image/webp" => "webp",
        _ => return Err(invalid_file("Only JPEG, PNG and WEBP images are allowed")),
    };
    let content_type = if declared == "image/jpg" {
        "image/jpeg".to_string()
    } else {
        declared
    };

    if !signature_matches(&content_type, &file.bytes) {
        return Err(invalid_file("File content does not match its type"));
    }
    Ok((content_type, extension))
}

#[derive(Debug, Clone)]
pub struct UploadProfileImageCommand {
    pub user_id: UserId,
    pub file: ImageFile,
}

pub struct UploadProfileImageHandler {
    users: Arc<dyn UserRepository>,
    storage: Arc<dyn ImageStorage>,
}

impl UploadProfileImageHandler {
    pub fn new(users: Arc<dyn UserRepository>, storage: Arc<dyn ImageStorage>) -> Self {
        Self { users, storage }
    }

    /// Returns the public URL of the stored image.
    pub async fn handle(&self, cmd: UploadProfileImageCommand) -> Result<String, DomainError> {
        let (content_type, extension) = inspect_image(&cmd.file)?;
        let mut user = load_user(self.users.as_ref(), &cmd.user_id).await?;

        let stored = self
            .storage
            .upload(ImageUpload {
                key: format!("{}-{}", user.id, Uuid::new_v4().simple()),
                content_type,
                extension,
                bytes: cmd.file.bytes,
            })
            .await?;

        let previous = user.set_profile_image(stored.url.clone(), stored.public_id.clone());
        if let Err(err) = self.users.update(&user).await {
            if let Err(cleanup) = self.storage.delete(&stored.public_id).await {
                tracing::warn!(error = %cleanup, public_id = %stored.public_id, "orphaned upload");
            }
            return Err(err);
        }

        tracing::info!(user_id = %user.id, public_id = %stored.public_id, "profile image stored");
        if let Some(old) = previous.filter(|old| *old != stored.public_id) {
            if let Err(e) = self.storage.delete(&old).await {
                tracing::warn!(error = %e, public_id = %old, "failed to remove replaced profile image");
            }
        }
        Ok(stored.url)
    }
}
