//! Attendee-facing endpoints: browsing, registration, payment and reviews.

mod dto;
mod handlers;
mod routes;

pub use dto::{PaymentRequest, RegisterRequest, RegistrationResponse, ReviewRequest};
pub use routes::user_routes;
