//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `EventRepository` - Events, including the delete cascade
//! - `DiscountRepository` - Discounts plus the event's discounted price
//! - `RegistrationRepository` - Atomic seat claim with registration and payment
//! - `PaymentRepository` - Settlement and payment listings
//! - `ReviewRepository` - Reviews, unique per registration and user
//! - `UserRepository` - Accounts and refresh tokens
//!
//! ## Infrastructure Ports
//!
//! - `ImageStorage` - Event poster uploads
//! - `PasswordHasher` - One-way password hashing
//! - `TokenService` - Access and refresh token issue/verify

mod credentials;
mod discount_repository;
mod event_repository;
mod image_storage;
mod payment_repository;
mod registration_repository;
mod review_repository;
mod user_repository;

pub use credentials::{IssuedToken, PasswordHasher, TokenService};
pub use discount_repository::DiscountRepository;
pub use event_repository::{EventRepository, EventRevision};
pub use image_storage::{ImageStorage, ImageUpload};
pub use payment_repository::{PaymentRecord, PaymentRepository};
pub use registration_repository::{
    EventSummary, RegistrationRecord, RegistrationRepository, UserRegistration,
};
pub use review_repository::{ReviewRepository, ReviewWithAuthor};
pub use user_repository::UserRepository;
