//! Admin statistics queries.

mod admin_listings;
mod event_attendees;

pub use admin_listings::AdminListingsHandler;
pub use event_attendees::{EventAttendees, GetEventAttendeesHandler, GetEventAttendeesQuery};
