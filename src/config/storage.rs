//! Profile image storage configuration

use secrecy::SecretString;
use serde::Deserialize;

use super::error::ValidationError;

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageProvider {
    /// Files on local disk, served by this process under `/uploads`
    #[default]
    Local,
    Cloudinary,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub provider: StorageProvider,

    #[serde(default = "default_local_dir")]
    pub local_dir: String,

    /// Public URL prefix for locally stored files
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    pub cloudinary_cloud_name: Option<String>,

    pub cloudinary_api_key: Option<String>,

    pub cloudinary_api_secret: Option<SecretString>,

    #[serde(default = "default_cloudinary_folder")]
    pub cloudinary_folder: String,

    #[serde(default = "default_cloudinary_api_base_url")]
    pub cloudinary_api_base_url: String,
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.provider {
            StorageProvider::Local => {
                if self.local_dir.is_empty() {
                    return Err(ValidationError::MissingRequired("STORAGE__LOCAL_DIR"));
                }
            }
            StorageProvider::Cloudinary => {
                if self.cloudinary_cloud_name.as_deref().unwrap_or_default().is_empty() {
                    return Err(ValidationError::MissingRequired(
                        "STORAGE__CLOUDINARY_CLOUD_NAME",
                    ));
                }
                if self.cloudinary_api_key.as_deref().unwrap_or_default().is_empty() {
                    return Err(ValidationError::MissingRequired("STORAGE__CLOUDINARY_API_KEY"));
                }
                if self.cloudinary_api_secret.is_none() {
                    return Err(ValidationError::MissingRequired(
                        "STORAGE__CLOUDINARY_API_SECRET",
                    ));
                }
            }
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: StorageProvider::default(),
            local_dir: default_local_dir(),
            public_base_url: default_public_base_url(),
            cloudinary_cloud_name: None,
            cloudinary_api_key: None,
            cloudinary_api_secret: None,
            cloudinary_folder: default_cloudinary_folder(),
            cloudinary_api_base_url: default_cloudinary_api_base_url(),
        }
    }
}

fn default_local_dir() -> String {
    "./uploads".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:8080/uploads".to_string()
}

fn default_cloudinary_folder() -> String {
    "dolphin-streak/profile-images".to_string()
}

fn default_cloudinary_api_base_url() -> String {
    "https://api.cloudinary.com/v1_1".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_is_default() {
        let config = StorageConfig::default();
        assert_eq!(config.provider, StorageProvider::Local);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cloudinary_requires_credentials() {
        let mut config = StorageConfig {
            provider: StorageProvider::Cloudinary,
            cloudinary_cloud_name: Some("demo".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("STORAGE__CLOUDINARY_API_KEY"))
        );

        config.cloudinary_api_key = Some("1234".to_string());
        config.cloudinary_api_secret = Some(SecretString::new("shh".to_string()));
        assert!(config.validate().is_ok());
    }
}
