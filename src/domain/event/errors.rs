//! Event catalogue errors.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | Validation | 400 |
//! | Forbidden | 403 |
//! | ImageUpload | 502 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode, EventId};
use crate::domain::validation::ValidationReport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    NotFound(EventId),
    Validation(ValidationReport),
    Forbidden(String),
    /// The image store did not accept the upload; nothing was written.
    ImageUpload(String),
    Infrastructure(String),
}

impl EventError {
    pub fn not_found(id: EventId) -> Self {
        EventError::NotFound(id)
    }

    pub fn image_upload(reason: impl Into<String>) -> Self {
        EventError::ImageUpload(reason.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        EventError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            EventError::NotFound(_) => ErrorCode::EventNotFound,
            EventError::Validation(_) => ErrorCode::ValidationFailed,
            EventError::Forbidden(_) => ErrorCode::Forbidden,
            EventError::ImageUpload(_) => ErrorCode::StorageError,
            EventError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            EventError::NotFound(_) => "Event not found".to_string(),
            EventError::Validation(report) => format!("Validation failed: {}", report),
            EventError::Forbidden(reason) => reason.clone(),
            EventError::ImageUpload(_) => "Image upload failed".to_string(),
            EventError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for EventError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for EventError {}

impl From<DomainError> for EventError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => EventError::Forbidden(err.message),
            ErrorCode::StorageError => EventError::ImageUpload(err.message),
            _ => EventError::Infrastructure(err.to_string()),
        }
    }
}

impl From<ValidationReport> for EventError {
    fn from(report: ValidationReport) -> Self {
        EventError::Validation(report)
    }
}
