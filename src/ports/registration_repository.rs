//! Registration repository port and its read models.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::foundation::{DomainError, EventId, RegistrationId, Timestamp, UserId};
use crate::domain::registration::{Payment, Registration};

/// Short description of an event embedded in registration listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventSummary {
    pub id: EventId,
    pub title: String,
    pub date: Timestamp,
    pub location: String,
}

/// One of the caller's registrations with its payment and event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRegistration {
    #[serde(flatten)]
    pub registration: Registration,
    pub payment: Option<Payment>,
    pub event: EventSummary,
}

/// Admin listing row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationRecord {
    #[serde(flatten)]
    pub registration: Registration,
    pub user_email: String,
    pub event_title: String,
}

#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Claim seats and persist the registration with its pending payment.
    ///
    /// Seat check, seat decrement, registration insert and payment insert
    /// happen atomically. Two concurrent calls can never both succeed when
    /// only one of them fits.
    ///
    /// Returns the seats left after the claim.
    ///
    /// # Errors
    ///
    /// - `EventNotFound` if the event doesn't exist
    /// - `InsufficientSeats` if fewer than `registration.quantity` seats remain
    async fn register(
        &self,
        registration: &Registration,
        payment: &Payment,
    ) -> Result<u32, DomainError>;

    /// Persist a status change.
    ///
    /// # Errors
    ///
    /// - `RegistrationNotFound` if the registration doesn't exist
    async fn update(&self, registration: &Registration) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &RegistrationId) -> Result<Option<Registration>, DomainError>;

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<UserRegistration>, DomainError>;

    /// Registrations of one event (its attendee list).
    async fn list_for_event(&self, event_id: &EventId) -> Result<Vec<Registration>, DomainError>;

    async fn list_all(&self) -> Result<Vec<RegistrationRecord>, DomainError>;
}
