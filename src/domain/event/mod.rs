//! Event catalogue domain module.
//!
//! # Module Structure
//!
//! - `aggregate` - Event aggregate and its validated input
//! - `category` - Event category enum
//! - `filter` - Catalogue search filter
//! - `errors` - EventError

mod aggregate;
mod category;
mod errors;
mod filter;

pub use aggregate::{Event, EventDetails};
pub use category::Category;
pub use errors::EventError;
pub use filter::EventFilter;

#[cfg(test)]
pub(crate) use aggregate::tests::details as test_details;
