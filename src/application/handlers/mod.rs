//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations. Each
//! handler receives its ports as `Arc<dyn Port>` and returns the error enum
//! of its workflow.

pub mod account;
pub mod discount;
pub mod event;
pub mod registration;
pub mod review;
pub mod stats;

#[cfg(test)]
pub(crate) mod test_support;

pub use account::{
    GetUserHandler, GetUserQuery, LoginCommand, LoginHandler, LoginResult, RefreshTokenCommand,
    RefreshTokenHandler, RefreshTokenResult, SignUpCommand, SignUpHandler,
};
pub use discount::{
    ApplyDiscountCommand, ApplyDiscountHandler, ApplyDiscountResult, DeleteDiscountCommand,
    DeleteDiscountHandler, ListDiscountsHandler, UpdateDiscountCommand, UpdateDiscountHandler,
    UpdateDiscountResult,
};
pub use event::{
    CreateEventCommand, CreateEventHandler, CreateEventResult, DeleteEventCommand,
    DeleteEventHandler, GetEventHandler, GetEventQuery, ListEventsHandler, ListEventsQuery,
    UpdateEventCommand, UpdateEventHandler, UpdateEventResult,
};
pub use registration::{
    ListUserRegistrationsHandler, ListUserRegistrationsQuery, MarkAttendedCommand,
    MarkAttendedHandler, RegisterForEventCommand, RegisterForEventHandler, RegisterForEventResult,
    SettlePaymentCommand, SettlePaymentHandler,
};
pub use review::{ListReviewsHandler, SubmitReviewCommand, SubmitReviewHandler};
pub use stats::{AdminListingsHandler, EventAttendees, GetEventAttendeesHandler, GetEventAttendeesQuery};
