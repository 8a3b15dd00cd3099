//! Registration & payment domain module.
//!
//! # Module Structure
//!
//! - `aggregate` - Registration aggregate
//! - `payment` - Payment entity and method
//! - `quantity` - Seats per registration (1-5)
//! - `status` - Registration and payment state machines
//! - `errors` - RegistrationError

mod aggregate;
mod errors;
mod payment;
mod quantity;
mod status;

pub use aggregate::Registration;
pub use errors::RegistrationError;
pub use payment::{Payment, PaymentMethod};
pub use quantity::Quantity;
pub use status::{PaymentStatus, RegistrationStatus};
