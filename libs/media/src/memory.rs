//! In-memory media store for tests and credential-less local runs.

use crate::error::{MediaError, MediaResult};
use crate::store::{ImageUpload, MediaStore};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Records uploads and returns `memory://` URLs.
#[derive(Clone, Default)]
pub struct InMemoryMediaStore {
    uploads: Arc<Mutex<Vec<ImageUpload>>>,
    failure_message: Option<String>,
}

impl InMemoryMediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose uploads always fail with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            uploads: Arc::default(),
            failure_message: Some(message.into()),
        }
    }

    pub async fn uploads(&self) -> Vec<ImageUpload> {
        self.uploads.lock().await.clone()
    }

    pub async fn upload_count(&self) -> usize {
        self.uploads.lock().await.len()
    }
}

#[async_trait]
impl MediaStore for InMemoryMediaStore {
    async fn upload(&self, image: ImageUpload) -> MediaResult<String> {
        if let Some(message) = &self.failure_message {
            return Err(MediaError::Failed(message.clone()));
        }

        let mut uploads = self.uploads.lock().await;
        let url = format!("memory://images/{}/{}", uploads.len() + 1, image.file_name);
        uploads.push(image);
        Ok(url)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_uploads() {
        let store = InMemoryMediaStore::new();
        let url = store
            .upload(ImageUpload::new("latte.jpg", "image/jpeg", vec![7u8; 4]).unwrap())
            .await
            .unwrap();

        assert_eq!(url, "memory://images/1/latte.jpg");
        assert_eq!(store.upload_count().await, 1);
    }

    #[tokio::test]
    async fn test_failing_store() {
        let store = InMemoryMediaStore::failing("bucket offline");
        let err = store
            .upload(ImageUpload::new("latte.jpg", "image/jpeg", vec![7u8; 4]).unwrap())
            .await
            .unwrap_err();

        assert!(err.to_string().contains("bucket offline"));
        assert!(!err.is_client_error());
        assert_eq!(store.upload_count().await, 0);
    }
}
