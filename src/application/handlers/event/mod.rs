//! Event catalogue handlers.
//!
//! ## Commands
//! - Create, update and delete events (admin)
//!
//! ## Queries
//! - Get one event, list events with an optional filter

mod create_event;
mod delete_event;
mod get_event;
mod update_event;

pub use create_event::{CreateEventCommand, CreateEventHandler, CreateEventResult};
pub use delete_event::{DeleteEventCommand, DeleteEventHandler};
pub use get_event::{GetEventHandler, GetEventQuery, ListEventsHandler, ListEventsQuery};
pub use update_event::{UpdateEventCommand, UpdateEventHandler, UpdateEventResult};
