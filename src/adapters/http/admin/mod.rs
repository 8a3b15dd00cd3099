//! Admin endpoints: event and discount catalogue plus statistics.

mod dto;
mod form;
mod handlers;
mod routes;

pub use dto::{DiscountRequest, DiscountResponse};
pub use form::EventForm;
pub use routes::admin_routes;
