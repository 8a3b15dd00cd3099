//! Image storage configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;

const MAX_UPLOAD_CEILING: usize = 20 * 1024 * 1024;

/// Where event images are written and how they are served
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory uploaded images are written to
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,

    /// URL prefix under which `upload_dir` is publicly reachable
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    /// Upper bound on a single upload, in seconds
    #[serde(default = "default_upload_timeout")]
    pub upload_timeout_secs: u64,

    /// Largest accepted image, in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl StorageConfig {
    pub fn upload_timeout(&self) -> Duration {
        Duration::from_secs(self.upload_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.upload_timeout_secs == 0 || self.upload_timeout_secs > 120 {
            return Err(ValidationError::InvalidUploadTimeout);
        }
        if self.max_upload_bytes == 0 || self.max_upload_bytes > MAX_UPLOAD_CEILING {
            return Err(ValidationError::InvalidUploadSize);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            public_base_url: default_public_base_url(),
            upload_timeout_secs: default_upload_timeout(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("./uploads")
}

fn default_public_base_url() -> String {
    "/uploads".to_string()
}

fn default_upload_timeout() -> u64 {
    15
}

fn default_max_upload_bytes() -> usize {
    5 * 1024 * 1024
}
