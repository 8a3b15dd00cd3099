//! Registration and payment handlers.
//!
//! ## Commands
//! - Register for an event (creates a pending payment)
//! - Settle a payment
//! - Mark a registration attended
//!
//! ## Queries
//! - List the caller's registrations

mod list_user_registrations;
mod mark_attended;
mod register_for_event;
mod settle_payment;

pub use list_user_registrations::{ListUserRegistrationsHandler, ListUserRegistrationsQuery};
pub use mark_attended::{MarkAttendedCommand, MarkAttendedHandler};
pub use register_for_event::{
    RegisterForEventCommand, RegisterForEventHandler, RegisterForEventResult,
};
pub use settle_payment::{SettlePaymentCommand, SettlePaymentHandler};
