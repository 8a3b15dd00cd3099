//! HTTP adapters - REST API implementations.
//!
//! Each API area has its own module with `dto`, `handlers` and `routes`.
//! Responses share one envelope, built in `response`.

pub mod account;
pub mod admin;
pub mod middleware;
pub mod response;
pub mod router;
pub mod state;
pub mod user;

pub use response::{ApiError, ApiResponse, Envelope};
pub use router::{app_router, RouterOptions};
pub use state::AppState;
