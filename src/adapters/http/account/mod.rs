//! Account endpoints: sign-up, login and token refresh.

mod dto;
mod handlers;
mod routes;

pub use dto::{LoginResponse, RefreshRequest, TokenResponse, UserResponse};
pub use routes::account_routes;
