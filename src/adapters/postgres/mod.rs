//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresEventRepository` - Events and the delete cascade
//! - `PostgresDiscountRepository` - Discounts with event repricing
//! - `PostgresRegistrationRepository` - Seat claim, registrations, listings
//! - `PostgresPaymentRepository` - Settlement and payment listings
//! - `PostgresReviewRepository` - Reviews, unique per registration and user
//! - `PostgresUserRepository` - Accounts and refresh tokens

mod discount_repository;
mod event_repository;
mod payment_repository;
mod registration_repository;
mod review_repository;
mod rows;
mod user_repository;

pub use discount_repository::PostgresDiscountRepository;
pub use event_repository::PostgresEventRepository;
pub use payment_repository::PostgresPaymentRepository;
pub use registration_repository::PostgresRegistrationRepository;
pub use review_repository::PostgresReviewRepository;
pub use user_repository::PostgresUserRepository;
