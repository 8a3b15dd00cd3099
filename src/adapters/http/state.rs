//! Shared application state for every HTTP module.

use std::sync::Arc;

use sqlx::PgPool;

use crate::adapters::memory::InMemoryStore;
use crate::adapters::postgres::{
    PostgresDiscountRepository, PostgresEventRepository, PostgresPaymentRepository,
    PostgresRegistrationRepository, PostgresReviewRepository, PostgresUserRepository,
};
use crate::application::handlers::{
    AdminListingsHandler, ApplyDiscountHandler, CreateEventHandler, DeleteDiscountHandler,
    DeleteEventHandler, GetEventAttendeesHandler, GetEventHandler, GetUserHandler,
    ListDiscountsHandler, ListEventsHandler, ListReviewsHandler, ListUserRegistrationsHandler,
    LoginHandler, MarkAttendedHandler, RefreshTokenHandler, RegisterForEventHandler,
    SettlePaymentHandler, SignUpHandler, SubmitReviewHandler, UpdateDiscountHandler,
    UpdateEventHandler,
};
use crate::ports::{
    DiscountRepository, EventRepository, ImageStorage, PasswordHasher, PaymentRepository,
    RegistrationRepository, ReviewRepository, TokenService, UserRepository,
};

/// Shared application state containing all dependencies.
///
/// Cloned for each request; every field is an `Arc` so the clone is cheap.
/// Handlers are built on demand from the ports they need.
#[derive(Clone)]
pub struct AppState {
    pub events: Arc<dyn EventRepository>,
    pub discounts: Arc<dyn DiscountRepository>,
    pub registrations: Arc<dyn RegistrationRepository>,
    pub payments: Arc<dyn PaymentRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub users: Arc<dyn UserRepository>,
    pub images: Arc<dyn ImageStorage>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub tokens: Arc<dyn TokenService>,
}

impl AppState {
    /// State backed by PostgreSQL repositories sharing one pool.
    pub fn postgres(
        pool: PgPool,
        images: Arc<dyn ImageStorage>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            events: Arc::new(PostgresEventRepository::new(pool.clone())),
            discounts: Arc::new(PostgresDiscountRepository::new(pool.clone())),
            registrations: Arc::new(PostgresRegistrationRepository::new(pool.clone())),
            payments: Arc::new(PostgresPaymentRepository::new(pool.clone())),
            reviews: Arc::new(PostgresReviewRepository::new(pool.clone())),
            users: Arc::new(PostgresUserRepository::new(pool)),
            images,
            hasher,
            tokens,
        }
    }

    /// State backed by a single in-memory store for every repository.
    pub fn in_memory(
        store: Arc<InMemoryStore>,
        images: Arc<dyn ImageStorage>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            events: store.clone(),
            discounts: store.clone(),
            registrations: store.clone(),
            payments: store.clone(),
            reviews: store.clone(),
            users: store,
            images,
            hasher,
            tokens,
        }
    }

    // Events

    pub fn create_event_handler(&self) -> CreateEventHandler {
        CreateEventHandler::new(self.events.clone(), self.images.clone())
    }

    pub fn update_event_handler(&self) -> UpdateEventHandler {
        UpdateEventHandler::new(self.events.clone(), self.images.clone())
    }

    pub fn delete_event_handler(&self) -> DeleteEventHandler {
        DeleteEventHandler::new(self.events.clone())
    }

    pub fn get_event_handler(&self) -> GetEventHandler {
        GetEventHandler::new(self.events.clone())
    }

    pub fn list_events_handler(&self) -> ListEventsHandler {
        ListEventsHandler::new(self.events.clone())
    }

    // Discounts

    pub fn apply_discount_handler(&self) -> ApplyDiscountHandler {
        ApplyDiscountHandler::new(self.discounts.clone())
    }

    pub fn update_discount_handler(&self) -> UpdateDiscountHandler {
        UpdateDiscountHandler::new(self.discounts.clone())
    }

    pub fn delete_discount_handler(&self) -> DeleteDiscountHandler {
        DeleteDiscountHandler::new(self.discounts.clone())
    }

    pub fn list_discounts_handler(&self) -> ListDiscountsHandler {
        ListDiscountsHandler::new(self.discounts.clone())
    }

    // Registrations

    pub fn register_for_event_handler(&self) -> RegisterForEventHandler {
        RegisterForEventHandler::new(
            self.events.clone(),
            self.discounts.clone(),
            self.registrations.clone(),
        )
    }

    pub fn settle_payment_handler(&self) -> SettlePaymentHandler {
        SettlePaymentHandler::new(self.registrations.clone(), self.payments.clone())
    }

    pub fn mark_attended_handler(&self) -> MarkAttendedHandler {
        MarkAttendedHandler::new(self.registrations.clone())
    }

    pub fn list_user_registrations_handler(&self) -> ListUserRegistrationsHandler {
        ListUserRegistrationsHandler::new(self.registrations.clone())
    }

    // Reviews

    pub fn submit_review_handler(&self) -> SubmitReviewHandler {
        SubmitReviewHandler::new(self.registrations.clone(), self.reviews.clone())
    }

    pub fn list_reviews_handler(&self) -> ListReviewsHandler {
        ListReviewsHandler::new(self.reviews.clone())
    }

    // Accounts

    pub fn sign_up_handler(&self) -> SignUpHandler {
        SignUpHandler::new(self.users.clone(), self.hasher.clone())
    }

    pub fn login_handler(&self) -> LoginHandler {
        LoginHandler::new(self.users.clone(), self.hasher.clone(), self.tokens.clone())
    }

    pub fn refresh_token_handler(&self) -> RefreshTokenHandler {
        RefreshTokenHandler::new(self.users.clone(), self.tokens.clone())
    }

    pub fn get_user_handler(&self) -> GetUserHandler {
        GetUserHandler::new(self.users.clone())
    }

    // Stats

    pub fn admin_listings_handler(&self) -> AdminListingsHandler {
        AdminListingsHandler::new(
            self.users.clone(),
            self.registrations.clone(),
            self.payments.clone(),
        )
    }

    pub fn event_attendees_handler(&self) -> GetEventAttendeesHandler {
        GetEventAttendeesHandler::new(self.events.clone(), self.registrations.clone())
    }
}
