//! AdminListingsHandler - Query handler for the admin dashboards.

use std::sync::Arc;

use crate::domain::account::User;
use crate::domain::foundation::DomainError;
use crate::ports::{
    PaymentRecord, PaymentRepository, RegistrationRecord, RegistrationRepository, UserRepository,
};

/// Unfiltered listings of users, registrations and payments.
///
/// Role checks happen at the HTTP boundary; these queries trust their
/// caller. Errors are passed through untouched since every failure here is
/// infrastructural.
pub struct AdminListingsHandler {
    users: Arc<dyn UserRepository>,
    registrations: Arc<dyn RegistrationRepository>,
    payments: Arc<dyn PaymentRepository>,
}

impl AdminListingsHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        registrations: Arc<dyn RegistrationRepository>,
        payments: Arc<dyn PaymentRepository>,
    ) -> Self {
        Self {
            users,
            registrations,
            payments,
        }
    }

    pub async fn users(&self) -> Result<Vec<User>, DomainError> {
        self.users.list_all().await
    }

    /// Registrations with the registering user's email and event title.
    pub async fn registrations(&self) -> Result<Vec<RegistrationRecord>, DomainError> {
        self.registrations.list_all().await
    }

    /// Payments with their registration, user email and event title.
    pub async fn payments(&self) -> Result<Vec<PaymentRecord>, DomainError> {
        self.payments.list_all().await
    }
}
