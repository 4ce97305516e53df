use async_trait::async_trait;

use crate::error::{MediaError, MediaResult};

/// Largest image accepted for upload (5 MiB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

fn is_image(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|mime| mime.trim().to_ascii_lowercase().starts_with("image/"))
}

/// An image file ready to be uploaded.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> MediaResult<Self> {
        let content_type = content_type.into();
        if !is_image(&content_type) {
            return Err(MediaError::UnsupportedType(content_type));
        }

        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(MediaError::Empty);
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(MediaError::TooLarge {
                size: bytes.len(),
                max_mb: MAX_IMAGE_BYTES / (1024 * 1024),
            });
        }

        Ok(Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Stores images and hands back a publicly reachable URL.
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn upload(&self, image: ImageUpload) -> MediaResult<String>;

    /// Store name for logs
    fn name(&self) -> &'static str;
}
