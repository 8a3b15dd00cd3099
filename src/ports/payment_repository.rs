//! Payment repository port.
//!
//! Payments are created by `RegistrationRepository::register`; this port
//! only reads and settles them.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::foundation::{DomainError, RegistrationId};
use crate::domain::registration::{Payment, Registration};

/// Admin listing row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentRecord {
    #[serde(flatten)]
    pub payment: Payment,
    pub registration: Registration,
    pub user_email: String,
    pub event_title: String,
}

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn find_by_registration(
        &self,
        registration_id: &RegistrationId,
    ) -> Result<Option<Payment>, DomainError>;

    /// Persist status, method and payment date.
    ///
    /// # Errors
    ///
    /// - `PaymentNotFound` if the payment doesn't exist
    async fn update(&self, payment: &Payment) -> Result<(), DomainError>;

    async fn list_all(&self) -> Result<Vec<PaymentRecord>, DomainError>;
}
