//! Cloudinary image store.
//!
//! Uses the signed upload API:
//! `POST {api_base}/v1_1/{cloud_name}/image/upload` with a multipart body.

use crate::error::{MediaError, MediaResult};
use crate::store::{ImageUpload, MediaStore};
use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_or_default, env_required};
use reqwest::{Client, multipart};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::{debug, error, instrument};

const DEFAULT_API_BASE: &str = "https://api.cloudinary.com";

/// Cloudinary credentials.
///
/// Environment variables:
/// - `CLOUDINARY_CLOUD_NAME`, `CLOUDINARY_API_KEY`, `CLOUDINARY_API_SECRET` (required)
/// - `CLOUDINARY_UPLOAD_FOLDER` (optional)
/// - `CLOUDINARY_API_BASE` (default: `https://api.cloudinary.com`)
#[derive(Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub folder: Option<String>,
    pub api_base: String,
}

impl std::fmt::Debug for CloudinaryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinaryConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"****")
            .field("folder", &self.folder)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl CloudinaryConfig {
    pub fn new(
        cloud_name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            cloud_name: cloud_name.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            folder: None,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = Some(folder.into());
        self
    }

    pub fn upload_url(&self) -> String {
        format!(
            "{}/v1_1/{}/image/upload",
            self.api_base.trim_end_matches('/'),
            self.cloud_name
        )
    }
}

impl FromEnv for CloudinaryConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            cloud_name: env_required("CLOUDINARY_CLOUD_NAME")?,
            api_key: env_required("CLOUDINARY_API_KEY")?,
            api_secret: env_required("CLOUDINARY_API_SECRET")?,
            folder: std::env::var("CLOUDINARY_UPLOAD_FOLDER")
                .ok()
                .filter(|f| !f.trim().is_empty()),
            api_base: env_or_default("CLOUDINARY_API_BASE", DEFAULT_API_BASE),
        })
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    url: Option<String>,
}

/// [`MediaStore`] backed by Cloudinary.
pub struct CloudinaryStore {
    config: CloudinaryConfig,
    client: Client,
}

impl CloudinaryStore {
    pub fn new(config: CloudinaryConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Parameters that must be signed, sorted by name.
    fn signed_params(&self, timestamp: i64) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(2);
        if let Some(folder) = &self.config.folder {
            params.push(("folder", folder.clone()));
        }
        params.push(("timestamp", timestamp.to_string()));
        params.sort_by_key(|(name, _)| *name);
        params
    }

    /// SHA-256 hex of `a=1&b=2` followed by the API secret.
    fn sign(&self, params: &[(&'static str, String)]) -> String {
        let to_sign = params
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&");

        let mut hasher = Sha256::new();
        hasher.update(to_sign.as_bytes());
        hasher.update(self.config.api_secret.as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[async_trait]
impl MediaStore for CloudinaryStore {
    #[instrument(skip(self, image), fields(file_name = %image.file_name, size = image.len()))]
    async fn upload(&self, image: ImageUpload) -> MediaResult<String> {
        let params = self.signed_params(chrono::Utc::now().timestamp());
        let signature = self.sign(&params);

        let file = multipart::Part::bytes(image.bytes().to_vec())
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)?;

        let mut form = multipart::Form::new()
            .part("file", file)
            .text("api_key", self.config.api_key.clone())
            .text("signature", signature)
            .text("signature_algorithm", "sha256");
        for (name, value) in params {
            form = form.text(name, value);
        }

        debug!("Uploading image to Cloudinary");

        let response = self
            .client
            .post(self.config.upload_url())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, error = %body, "Cloudinary upload rejected");
            return Err(MediaError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let body: UploadResponse = response.json().await?;
        let url = body.secure_url.or(body.url).ok_or(MediaError::MissingUrl)?;

        debug!(url = %url, "Image uploaded");
        Ok(url)
    }

    fn name(&self) -> &'static str {
        "cloudinary"
    }
}
