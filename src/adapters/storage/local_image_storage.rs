//! Local filesystem implementation of ImageStorage.
//!
//! Images are content-addressed: the file name is the SHA-256 of the bytes
//! plus the original extension, so re-uploading the same poster reuses the
//! same file. Writes go to a temp file that is renamed into place.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::config::StorageConfig;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{ImageStorage, ImageUpload};

const ALLOWED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

#[derive(Debug, Clone)]
pub struct LocalImageStorage {
    base_dir: PathBuf,
    public_base_url: String,
    timeout: Duration,
    max_bytes: usize,
}

impl LocalImageStorage {
    pub fn new(
        base_dir: impl Into<PathBuf>,
        public_base_url: impl Into<String>,
        timeout: Duration,
        max_bytes: usize,
    ) -> Self {
        Self {
            base_dir: base_dir.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
            timeout,
            max_bytes,
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(
            config.upload_dir.clone(),
            config.public_base_url.clone(),
            config.upload_timeout(),
            config.max_upload_bytes,
        )
    }

    fn content_name(image: &ImageUpload, extension: &str) -> String {
        let digest = Sha256::digest(&image.bytes);
        format!("{:x}.{}", digest, extension)
    }

    async fn write_atomically(&self, name: &str, bytes: &[u8]) -> Result<(), DomainError> {
        fs::create_dir_all(&self.base_dir)
            .await
            .map_err(|e| storage_error(format!("Failed to create upload directory: {}", e)))?;

        let target = self.base_dir.join(name);
        let temp = self.base_dir.join(format!("{}.tmp", name));

        let mut file = fs::File::create(&temp)
            .await
            .map_err(|e| storage_error(format!("Failed to create {}: {}", temp.display(), e)))?;
        file.write_all(bytes)
            .await
            .map_err(|e| storage_error(format!("Failed to write image: {}", e)))?;
        file.sync_all()
            .await
            .map_err(|e| storage_error(format!("Failed to sync image: {}", e)))?;
        drop(file);

        fs::rename(&temp, &target)
            .await
            .map_err(|e| storage_error(format!("Failed to move image into place: {}", e)))
    }
}

fn storage_error(message: impl Into<String>) -> DomainError {
    DomainError::new(ErrorCode::StorageError, message)
}

/// Lower-cased extension of `filename` if it names an accepted image type.
fn image_extension(filename: &str) -> Option<String> {
    let ext = Path::new(filename).extension()?.to_str()?.to_ascii_lowercase();
    ALLOWED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

#[async_trait]
impl ImageStorage for LocalImageStorage {
    async fn upload(&self, image: ImageUpload) -> Result<String, DomainError> {
        if image.bytes.is_empty() {
            return Err(storage_error("Image is empty"));
        }
        if image.bytes.len() > self.max_bytes {
            return Err(storage_error(format!(
                "Image exceeds {} bytes",
                self.max_bytes
            )));
        }
        if let Some(content_type) = image.content_type.as_deref() {
            if !content_type.starts_with("image/") {
                return Err(storage_error(format!("Unsupported content type {}", content_type)));
            }
        }
        let extension = image_extension(&image.filename)
            .ok_or_else(|| storage_error(format!("Unsupported image file {}", image.filename)))?;

        let name = Self::content_name(&image, &extension);
        tokio::time::timeout(self.timeout, self.write_atomically(&name, &image.bytes))
            .await
            .map_err(|_| {
                tracing::warn!(file = %name, timeout = ?self.timeout, "Image upload timed out");
                storage_error("Image upload timed out")
            })??;

        tracing::info!(file = %name, bytes = image.bytes.len(), "Stored event image");
        Ok(format!("{}/{}", self.public_base_url, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn storage(dir: &TempDir) -> LocalImageStorage {
        LocalImageStorage::new(dir.path(), "/uploads/", Duration::from_secs(5), 1024)
    }

    fn png(bytes: &[u8]) -> ImageUpload {
        ImageUpload {
            filename: "poster.PNG".to_string(),
            content_type: Some("image/png".to_string()),
            bytes: bytes.to_vec(),
        }
    }

    #[tokio::test]
    async fn upload_writes_content_addressed_file() {
        let dir = TempDir::new().unwrap();
        let url = storage(&dir).upload(png(b"fake-png")).await.unwrap();

        assert!(url.starts_with("/uploads/"));
        assert!(url.ends_with(".png"));
        let name = url.trim_start_matches("/uploads/");
        let stored = std::fs::read(dir.path().join(name)).unwrap();
        assert_eq!(stored, b"fake-png");
    }

    #[tokio::test]
    async fn identical_bytes_map_to_same_url() {
        let dir = TempDir::new().unwrap();
        let s = storage(&dir);
        let a = s.upload(png(b"same")).await.unwrap();
        let b = s.upload(png(b"same")).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn rejects_oversized_and_non_images() {
        let dir = TempDir::new().unwrap();
        let s = storage(&dir);

        let err = s.upload(png(&[0u8; 2048])).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::StorageError);

        let mut doc = png(b"text");
        doc.filename = "notes.txt".to_string();
        doc.content_type = Some("text/plain".to_string());
        assert!(s.upload(doc).await.is_err());

        assert!(s.upload(png(b"")).await.is_err());
    }

    #[test]
    fn extension_is_normalised() {
        assert_eq!(image_extension("a.JPG").as_deref(), Some("jpg"));
        assert_eq!(image_extension("noext"), None);
        assert_eq!(image_extension("a.exe"), None);
    }
}
