//! SettlePaymentHandler - Command handler for completing a payment.

use std::sync::Arc;

use crate::domain::foundation::{ErrorCode, OwnedByUser, Principal, RegistrationId, Timestamp};
use crate::domain::registration::{Payment, RegistrationError};
use crate::domain::validation::{validate_payment, PaymentInput};
use crate::ports::{PaymentRepository, RegistrationRepository};

#[derive(Debug, Clone)]
pub struct SettlePaymentCommand {
    pub principal: Principal,
    pub registration_id: RegistrationId,
    pub input: PaymentInput,
}

/// Marks the payment of one of the caller's registrations as completed.
///
/// Settling a completed payment again succeeds and overwrites the method
/// and payment date. No external processor is involved.
pub struct SettlePaymentHandler {
    registrations: Arc<dyn RegistrationRepository>,
    payments: Arc<dyn PaymentRepository>,
}

impl SettlePaymentHandler {
    pub fn new(
        registrations: Arc<dyn RegistrationRepository>,
        payments: Arc<dyn PaymentRepository>,
    ) -> Self {
        Self {
            registrations,
            payments,
        }
    }

    pub async fn handle(&self, cmd: SettlePaymentCommand) -> Result<Payment, RegistrationError> {
        // 1. Validate the method
        let method = validate_payment(&cmd.input)?;

        // 2. The registration must exist and belong to the caller
        let registration = self
            .registrations
            .find_by_id(&cmd.registration_id)
            .await?
            .ok_or_else(|| RegistrationError::registration_not_found(cmd.registration_id))?;
        registration.check_ownership(&cmd.principal)?;

        // 3. Settle
        let mut payment = self
            .payments
            .find_by_registration(&cmd.registration_id)
            .await?
            .ok_or_else(|| RegistrationError::payment_not_found(cmd.registration_id))?;
        let resettled = payment.is_completed();
        payment.settle(method, Timestamp::now());

        self.payments.update(&payment).await.map_err(|e| match e.code {
            ErrorCode::PaymentNotFound => RegistrationError::payment_not_found(cmd.registration_id),
            _ => e.into(),
        })?;

        if resettled {
            tracing::warn!(
                payment_id = %payment.id,
                registration_id = %cmd.registration_id,
                "Payment settled again"
            );
        } else {
            tracing::info!(
                payment_id = %payment.id,
                registration_id = %cmd.registration_id,
                method = %method,
                amount = %payment.amount,
                "Payment completed"
            );
        }

        Ok(payment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::test_support::{seed_event, seed_registration};
    use crate::domain::foundation::{Role, UserId};
    use crate::domain::registration::{PaymentMethod, PaymentStatus};

    fn handler(store: &Arc<InMemoryStore>) -> SettlePaymentHandler {
        SettlePaymentHandler::new(store.clone(), store.clone())
    }

    fn command(principal: Principal, registration_id: RegistrationId, method: &str) -> SettlePaymentCommand {
        SettlePaymentCommand {
            principal,
            registration_id,
            input: PaymentInput {
                method: method.to_string(),
            },
        }
    }

    #[tokio::test]
    async fn completes_payment_with_chosen_method() {
        let store = Arc::new(InMemoryStore::new());
        let event = seed_event(&store, 100, 10).await;
        let owner = Principal::new(UserId::new(), Role::User);
        let (registration, pending) = seed_registration(&store, owner.id, &event, 2).await;

        let payment = handler(&store)
            .handle(command(owner, registration.id, "CREDIT_CARD"))
            .await
            .unwrap();

        assert_eq!(payment.status, PaymentStatus::Completed);
        assert_eq!(payment.method, PaymentMethod::CreditCard);
        assert!(payment.payment_date.is_some());
        assert_eq!(payment.amount, pending.amount);

        let stored = store.find_by_registration(&registration.id).await.unwrap().unwrap();
        assert_eq!(stored.status, PaymentStatus::Completed);
    }

    #[tokio::test]
    async fn settling_twice_succeeds_both_times() {
        let store = Arc::new(InMemoryStore::new());
        let event = seed_event(&store, 100, 10).await;
        let owner = Principal::new(UserId::new(), Role::User);
        let (registration, _) = seed_registration(&store, owner.id, &event, 1).await;
        let handler = handler(&store);

        handler
            .handle(command(owner, registration.id, "QRIS"))
            .await
            .unwrap();
        let second = handler
            .handle(command(owner, registration.id, "BANK_TRANSFER"))
            .await
            .unwrap();

        assert_eq!(second.status, PaymentStatus::Completed);
        assert_eq!(second.method, PaymentMethod::BankTransfer);
    }

    #[tokio::test]
    async fn unknown_method_is_validation_error() {
        let store = Arc::new(InMemoryStore::new());
        let event = seed_event(&store, 100, 10).await;
        let owner = Principal::new(UserId::new(), Role::User);
        let (registration, _) = seed_registration(&store, owner.id, &event, 1).await;

        let err = handler(&store)
            .handle(command(owner, registration.id, "CASH"))
            .await
            .unwrap_err();

        assert!(matches!(err, RegistrationError::Validation(_)));
    }

    #[tokio::test]
    async fn other_users_registration_is_forbidden() {
        let store = Arc::new(InMemoryStore::new());
        let event = seed_event(&store, 100, 10).await;
        let (registration, _) = seed_registration(&store, UserId::new(), &event, 1).await;
        let stranger = Principal::new(UserId::new(), Role::User);

        let err = handler(&store)
            .handle(command(stranger, registration.id, "QRIS"))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::Forbidden);
        let stored = store.find_by_registration(&registration.id).await.unwrap().unwrap();
        assert_eq!(stored.status, PaymentStatus::Pending);
    }

    #[tokio::test]
    async fn unknown_registration_is_not_found() {
        let id = RegistrationId::new();
        let err = handler(&Arc::new(InMemoryStore::new()))
            .handle(command(Principal::new(UserId::new(), Role::User), id, "QRIS"))
            .await
            .unwrap_err();
        assert_eq!(err, RegistrationError::RegistrationNotFound(id));
    }
}
