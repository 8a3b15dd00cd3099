//! RegisterForEventHandler - Command handler for buying tickets.

use std::sync::Arc;

use crate::domain::foundation::{
    authorize_ownership, ErrorCode, EventId, PaymentId, Principal, RegistrationId, Timestamp,
    UserId,
};
use crate::domain::pricing::{compute_charge, Charge};
use crate::domain::registration::{Payment, Registration, RegistrationError};
use crate::domain::validation::{validate_registration, RegistrationInput};
use crate::ports::{DiscountRepository, EventRepository, RegistrationRepository};

/// Command to register the caller for an event.
#[derive(Debug, Clone)]
pub struct RegisterForEventCommand {
    pub principal: Principal,
    /// User id sent in the request body, if any. Must be the caller.
    pub user_id: Option<UserId>,
    pub event_id: EventId,
    pub input: RegistrationInput,
}

/// Result of a successful registration.
#[derive(Debug, Clone)]
pub struct RegisterForEventResult {
    pub registration: Registration,
    /// Pending payment for the computed amount.
    pub payment: Payment,
    pub charge: Charge,
    pub seats_left: u32,
}

/// Handler for registering to an event.
///
/// Pricing reads the event's discounts in the same request. The seat claim,
/// registration and payment are written by one atomic repository call.
pub struct RegisterForEventHandler {
    events: Arc<dyn EventRepository>,
    discounts: Arc<dyn DiscountRepository>,
    registrations: Arc<dyn RegistrationRepository>,
}

impl RegisterForEventHandler {
    pub fn new(
        events: Arc<dyn EventRepository>,
        discounts: Arc<dyn DiscountRepository>,
        registrations: Arc<dyn RegistrationRepository>,
    ) -> Self {
        Self {
            events,
            discounts,
            registrations,
        }
    }

    pub async fn handle(
        &self,
        cmd: RegisterForEventCommand,
    ) -> Result<RegisterForEventResult, RegistrationError> {
        // 1. Validate input and caller
        let quantity = validate_registration(&cmd.input)?;
        if let Some(user_id) = cmd.user_id {
            authorize_ownership(&cmd.principal, &user_id).into_result()?;
        }

        // 2. Load the event
        let event = self
            .events
            .find_by_id(&cmd.event_id)
            .await?
            .ok_or_else(|| RegistrationError::event_not_found(cmd.event_id))?;

        let now = Timestamp::now();
        if event.is_past(&now) {
            return Err(RegistrationError::PastEvent(event.id));
        }

        // 3. Price the order against the current discounts
        let discounts = self.discounts.list_for_event(&event.id).await?;
        let charge = compute_charge(&event, &discounts, quantity, &now);

        if !event.has_seats(quantity.seats()) {
            return Err(RegistrationError::insufficient_seats(
                Some(event.seat_quantity),
                quantity.seats(),
            ));
        }

        // 4. Claim seats and persist registration with its pending payment
        let registration =
            Registration::new(RegistrationId::new(), cmd.principal.id, event.id, quantity);
        let payment = Payment::pending(PaymentId::new(), registration.id, charge.amount);

        let seats_left = self
            .registrations
            .register(&registration, &payment)
            .await
            .map_err(|e| match e.code {
                ErrorCode::EventNotFound => RegistrationError::event_not_found(cmd.event_id),
                _ => e.into(),
            })?;

        tracing::info!(
            registration_id = %registration.id,
            event_id = %event.id,
            user_id = %registration.user_id,
            quantity = quantity.value(),
            amount = %charge.amount,
            seats_left,
            "Registration created"
        );

        Ok(RegisterForEventResult {
            registration,
            payment,
            charge,
            seats_left,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::test_support::{seed_event, seed_past_event};
    use crate::domain::discount::{Discount, DiscountWindow};
    use crate::domain::foundation::{DiscountId, Money, Percentage, Role};
    use crate::domain::pricing::PriceBasis;
    use crate::domain::registration::PaymentStatus;

    fn handler(store: &Arc<InMemoryStore>) -> RegisterForEventHandler {
        RegisterForEventHandler::new(store.clone(), store.clone(), store.clone())
    }

    fn command(principal: Principal, event_id: EventId, quantity: i64) -> RegisterForEventCommand {
        RegisterForEventCommand {
            principal,
            user_id: None,
            event_id,
            input: RegistrationInput { quantity },
        }
    }

    fn attendee() -> Principal {
        Principal::new(UserId::new(), Role::User)
    }

    #[tokio::test]
    async fn registers_with_pending_payment_and_claims_seats() {
        let store = Arc::new(InMemoryStore::new());
        let event = seed_event(&store, 100, 5).await;

        let result = handler(&store)
            .handle(command(attendee(), event.id, 2))
            .await
            .unwrap();

        assert_eq!(result.payment.status, PaymentStatus::Pending);
        assert_eq!(result.payment.amount, Money::from_minor(200));
        assert_eq!(result.payment.registration_id, result.registration.id);
        assert_eq!(result.seats_left, 3);
        assert_eq!(store.seats_left(&event.id).await, Some(3));
    }

    #[tokio::test]
    async fn active_discount_charges_discounted_price() {
        let store = Arc::new(InMemoryStore::new());
        let event = seed_event(&store, 100, 10).await;
        let now = Timestamp::now();
        store
            .apply(&Discount::new(
                DiscountId::new(),
                event.id,
                Percentage::try_new(20).unwrap(),
                DiscountWindow::new(now.minus_days(1), now.plus_days(1)).unwrap(),
            ))
            .await
            .unwrap();

        let result = handler(&store)
            .handle(command(attendee(), event.id, 2))
            .await
            .unwrap();

        assert_eq!(result.charge.basis, PriceBasis::Discounted);
        assert_eq!(result.payment.amount, Money::from_minor(160));
    }

    #[tokio::test]
    async fn free_event_payment_is_zero() {
        let store = Arc::new(InMemoryStore::new());
        let event = seed_event(&store, 0, 10).await;

        let result = handler(&store)
            .handle(command(attendee(), event.id, 3))
            .await
            .unwrap();

        assert!(result.payment.amount.is_zero());
    }

    #[tokio::test]
    async fn quantity_outside_bounds_is_rejected_before_any_write() {
        let store = Arc::new(InMemoryStore::new());
        let event = seed_event(&store, 100, 10).await;

        for quantity in [0, 6, -1] {
            let err = handler(&store)
                .handle(command(attendee(), event.id, quantity))
                .await
                .unwrap_err();
            assert!(matches!(err, RegistrationError::Validation(_)));
        }
        assert_eq!(store.registration_count().await, 0);
        assert_eq!(store.seats_left(&event.id).await, Some(10));
    }

    #[tokio::test]
    async fn past_event_is_rejected() {
        let store = Arc::new(InMemoryStore::new());
        let event = seed_past_event(&store).await;

        let err = handler(&store)
            .handle(command(attendee(), event.id, 1))
            .await
            .unwrap_err();

        assert_eq!(err, RegistrationError::PastEvent(event.id));
        assert_eq!(err.message(), "Cannot register for past events");
    }

    #[tokio::test]
    async fn too_few_seats_is_rejected_without_side_effects() {
        let store = Arc::new(InMemoryStore::new());
        let event = seed_event(&store, 100, 2).await;

        let err = handler(&store)
            .handle(command(attendee(), event.id, 3))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::InsufficientSeats);
        assert_eq!(store.seats_left(&event.id).await, Some(2));
        assert_eq!(store.registration_count().await, 0);
    }

    #[tokio::test]
    async fn unknown_event_is_not_found() {
        let store = Arc::new(InMemoryStore::new());
        let id = EventId::new();

        let err = handler(&store)
            .handle(command(attendee(), id, 1))
            .await
            .unwrap_err();

        assert_eq!(err, RegistrationError::EventNotFound(id));
    }

    #[tokio::test]
    async fn body_user_id_of_someone_else_is_forbidden() {
        let store = Arc::new(InMemoryStore::new());
        let event = seed_event(&store, 100, 10).await;
        let mut cmd = command(attendee(), event.id, 1);
        cmd.user_id = Some(UserId::new());

        let err = handler(&store).handle(cmd).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::Forbidden);
        assert_eq!(store.registration_count().await, 0);
    }

    #[tokio::test]
    async fn body_user_id_matching_caller_is_accepted() {
        let store = Arc::new(InMemoryStore::new());
        let event = seed_event(&store, 100, 10).await;
        let principal = attendee();
        let mut cmd = command(principal, event.id, 1);
        cmd.user_id = Some(principal.id);

        let result = handler(&store).handle(cmd).await.unwrap();

        assert_eq!(result.registration.user_id, principal.id);
    }
}
