//! Adapters - Implementations of the ports plus the HTTP surface.
//!
//! - `postgres` - Repository ports on PostgreSQL via sqlx
//! - `memory` - Repository ports in process memory, for tests and demos
//! - `auth` - Argon2 password hashing and JWT tokens
//! - `storage` - Event image storage on the local filesystem
//! - `http` - Axum routes, middleware and the response envelope

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod storage;
