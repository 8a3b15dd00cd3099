//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, errors and the authentication
//! vocabulary shared by every other domain module.

mod auth;
mod authorization;
mod errors;
mod ids;
mod money;
mod ownership;
mod percentage;
mod rating;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, Principal, Role};
pub use authorization::{authorize, authorize_ownership, AuthorizationResult};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{DiscountId, EventId, PaymentId, RegistrationId, ReviewId, UserId};
pub use money::Money;
pub use ownership::OwnedByUser;
pub use percentage::Percentage;
pub use rating::Rating;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
