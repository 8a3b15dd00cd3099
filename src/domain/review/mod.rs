//! Review domain module.
//!
//! A user may review each of their registrations once. Attendance is not
//! required.

mod aggregate;
mod errors;

pub use aggregate::{Review, ReviewComment};
pub use errors::ReviewError;
