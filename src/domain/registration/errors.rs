//! Registration and payment workflow errors.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | Validation | 400 |
//! | EventNotFound | 404 |
//! | RegistrationNotFound | 404 |
//! | PaymentNotFound | 404 |
//! | PastEvent | 400 |
//! | InsufficientSeats | 409 |
//! | Forbidden | 403 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode, EventId, RegistrationId};
use crate::domain::validation::ValidationReport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    Validation(ValidationReport),
    EventNotFound(EventId),
    RegistrationNotFound(RegistrationId),
    /// No payment row exists for the registration.
    PaymentNotFound(RegistrationId),
    PastEvent(EventId),
    InsufficientSeats { available: Option<u32>, requested: u32 },
    Forbidden(String),
    Infrastructure(String),
}

impl RegistrationError {
    pub fn event_not_found(id: EventId) -> Self {
        RegistrationError::EventNotFound(id)
    }

    pub fn registration_not_found(id: RegistrationId) -> Self {
        RegistrationError::RegistrationNotFound(id)
    }

    pub fn payment_not_found(id: RegistrationId) -> Self {
        RegistrationError::PaymentNotFound(id)
    }

    pub fn insufficient_seats(available: Option<u32>, requested: u32) -> Self {
        RegistrationError::InsufficientSeats { available, requested }
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        RegistrationError::Forbidden(reason.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        RegistrationError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            RegistrationError::Validation(_) => ErrorCode::ValidationFailed,
            RegistrationError::EventNotFound(_) => ErrorCode::EventNotFound,
            RegistrationError::RegistrationNotFound(_) => ErrorCode::RegistrationNotFound,
            RegistrationError::PaymentNotFound(_) => ErrorCode::PaymentNotFound,
            RegistrationError::PastEvent(_) => ErrorCode::PastEvent,
            RegistrationError::InsufficientSeats { .. } => ErrorCode::InsufficientSeats,
            RegistrationError::Forbidden(_) => ErrorCode::Forbidden,
            RegistrationError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            RegistrationError::Validation(report) => format!("Validation failed: {}", report),
            RegistrationError::EventNotFound(_) => "Event not found".to_string(),
            RegistrationError::RegistrationNotFound(_) => "Registration not found".to_string(),
            RegistrationError::PaymentNotFound(_) => "Payment not found".to_string(),
            RegistrationError::PastEvent(_) => "Cannot register for past events".to_string(),
            RegistrationError::InsufficientSeats { .. } => "Not enough seat available".to_string(),
            RegistrationError::Forbidden(reason) => reason.clone(),
            RegistrationError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for RegistrationError {}

impl From<DomainError> for RegistrationError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InsufficientSeats => RegistrationError::InsufficientSeats {
                available: err.details.get("available").and_then(|v| v.parse().ok()),
                requested: err
                    .details
                    .get("requested")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or_default(),
            },
            ErrorCode::Forbidden => RegistrationError::Forbidden(err.message),
            _ => RegistrationError::Infrastructure(err.to_string()),
        }
    }
}

impl From<ValidationReport> for RegistrationError {
    fn from(report: ValidationReport) -> Self {
        RegistrationError::Validation(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_messages_are_stable() {
        assert_eq!(
            RegistrationError::PastEvent(EventId::new()).message(),
            "Cannot register for past events"
        );
        assert_eq!(
            RegistrationError::insufficient_seats(Some(2), 3).message(),
            "Not enough seat available"
        );
    }

    #[test]
    fn seat_shortage_from_port_keeps_counts() {
        let err: RegistrationError =
            DomainError::new(ErrorCode::InsufficientSeats, "short")
                .with_detail("available", "2")
                .with_detail("requested", "3")
                .into();
        assert_eq!(
            err,
            RegistrationError::InsufficientSeats {
                available: Some(2),
                requested: 3
            }
        );
    }

    #[test]
    fn other_port_failures_are_infrastructure() {
        let err: RegistrationError = DomainError::database("pool timed out").into();
        assert_eq!(err.code(), ErrorCode::DatabaseError);
    }
}
