//! Axum router configuration for account endpoints.

use axum::{routing::post, Router};

use super::super::state::AppState;
use super::handlers::{login, refresh, register};

/// Create the account API router, mounted at `/api/auth`.
///
/// # Routes
///
/// - `POST /register` - Create an account
/// - `POST /login` - Returns access and refresh tokens
/// - `POST /refresh` - Trade a refresh token for a new access token
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
}
