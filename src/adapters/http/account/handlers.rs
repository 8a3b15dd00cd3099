//! HTTP handlers for account endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::response::IntoResponse;

use crate::application::handlers::{LoginCommand, RefreshTokenCommand, SignUpCommand};
use crate::domain::validation::{LoginInput, SignUpInput};

use super::super::response::{ApiError, ApiResponse};
use super::super::state::AppState;
use super::dto::{LoginResponse, RefreshRequest, TokenResponse, UserResponse};

/// POST /api/auth/register - Create an account
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<SignUpInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = body?;
    let user = state.sign_up_handler().handle(SignUpCommand { input }).await?;

    Ok(ApiResponse::created(
        "User registered successfully",
        UserResponse::from(user),
    ))
}

/// POST /api/auth/login - Exchange credentials for tokens
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = body?;
    let result = state.login_handler().handle(LoginCommand { input }).await?;

    let response = LoginResponse {
        user: UserResponse::from(result.user),
        access_token: TokenResponse::from(result.access_token),
        refresh_token: TokenResponse::from(result.refresh_token),
    };
    Ok(ApiResponse::ok("Login successful", response))
}

/// POST /api/auth/refresh - Issue a new access token
pub async fn refresh(
    State(state): State<AppState>,
    body: Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body?;
    let result = state
        .refresh_token_handler()
        .handle(RefreshTokenCommand {
            refresh_token: request.refresh_token,
        })
        .await?;

    Ok(ApiResponse::ok(
        "Token refreshed",
        TokenResponse::from(result.access_token),
    ))
}
