//! Review workflow errors.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | Validation | 400 |
//! | RegistrationNotFound | 404 |
//! | Duplicate | 409 |
//! | Forbidden | 403 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode, RegistrationId, UserId};
use crate::domain::validation::ValidationReport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewError {
    Validation(ValidationReport),
    RegistrationNotFound(RegistrationId),
    /// The user already reviewed this registration.
    Duplicate {
        registration_id: RegistrationId,
        user_id: UserId,
    },
    Forbidden(String),
    Infrastructure(String),
}

impl ReviewError {
    pub fn duplicate(registration_id: RegistrationId, user_id: UserId) -> Self {
        ReviewError::Duplicate {
            registration_id,
            user_id,
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ReviewError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ReviewError::Validation(_) => ErrorCode::ValidationFailed,
            ReviewError::RegistrationNotFound(_) => ErrorCode::RegistrationNotFound,
            ReviewError::Duplicate { .. } => ErrorCode::DuplicateReview,
            ReviewError::Forbidden(_) => ErrorCode::Forbidden,
            ReviewError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ReviewError::Validation(report) => format!("Validation failed: {}", report),
            ReviewError::RegistrationNotFound(_) => "Registration not found".to_string(),
            ReviewError::Duplicate { .. } => "You have already reviewed this event.".to_string(),
            ReviewError::Forbidden(reason) => reason.clone(),
            ReviewError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ReviewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ReviewError {}

impl From<DomainError> for ReviewError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => ReviewError::Forbidden(err.message),
            _ => ReviewError::Infrastructure(err.to_string()),
        }
    }
}

impl From<ValidationReport> for ReviewError {
    fn from(report: ValidationReport) -> Self {
        ReviewError::Validation(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_has_stable_message() {
        let err = ReviewError::duplicate(RegistrationId::new(), UserId::new());
        assert_eq!(err.code(), ErrorCode::DuplicateReview);
        assert_eq!(err.message(), "You have already reviewed this event.");
    }
}
