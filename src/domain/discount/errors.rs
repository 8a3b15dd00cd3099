//! Discount catalogue errors.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | EventNotFound | 404 |
//! | InvalidRange | 400 |
//! | Validation | 400 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DiscountId, DomainError, ErrorCode, EventId, Timestamp};
use crate::domain::validation::ValidationReport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscountError {
    NotFound(DiscountId),
    EventNotFound(EventId),
    /// `end` falls before `start`.
    InvalidRange { start: Timestamp, end: Timestamp },
    Validation(ValidationReport),
    Infrastructure(String),
}

impl DiscountError {
    pub fn not_found(id: DiscountId) -> Self {
        DiscountError::NotFound(id)
    }

    pub fn event_not_found(id: EventId) -> Self {
        DiscountError::EventNotFound(id)
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        DiscountError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            DiscountError::NotFound(_) => ErrorCode::DiscountNotFound,
            DiscountError::EventNotFound(_) => ErrorCode::EventNotFound,
            DiscountError::InvalidRange { .. } => ErrorCode::InvalidRange,
            DiscountError::Validation(_) => ErrorCode::ValidationFailed,
            DiscountError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            DiscountError::NotFound(_) => "Discount not found".to_string(),
            DiscountError::EventNotFound(_) => "Event not found".to_string(),
            DiscountError::InvalidRange { .. } => {
                "End date cannot be before start date".to_string()
            }
            DiscountError::Validation(report) => format!("Validation failed: {}", report),
            DiscountError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for DiscountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for DiscountError {}

impl From<DomainError> for DiscountError {
    fn from(err: DomainError) -> Self {
        DiscountError::Infrastructure(err.to_string())
    }
}

impl From<ValidationReport> for DiscountError {
    fn from(report: ValidationReport) -> Self {
        DiscountError::Validation(report)
    }
}
