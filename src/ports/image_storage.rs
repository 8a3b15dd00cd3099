//! Image storage port for event posters.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

/// An uploaded file as received from the client.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Store the image and return the URL it can be fetched from.
    ///
    /// # Errors
    ///
    /// - `StorageError` if the store rejects or cannot persist the upload
    async fn upload(&self, image: ImageUpload) -> Result<String, DomainError>;
}
