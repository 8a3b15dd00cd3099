//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Commands (create, register, settle, review) and queries (listings,
//! statistics) live side by side, one handler per operation.

pub mod handlers;

pub use handlers::*;
