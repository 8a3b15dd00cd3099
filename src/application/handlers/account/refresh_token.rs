//! RefreshTokenHandler - Command handler for renewing an access token.

use std::sync::Arc;

use subtle::ConstantTimeEq;

use crate::domain::foundation::{AuthError, Principal};
use crate::ports::{IssuedToken, TokenService, UserRepository};

#[derive(Clone)]
pub struct RefreshTokenCommand {
    pub refresh_token: String,
}

impl std::fmt::Debug for RefreshTokenCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("RefreshTokenCommand(***)")
    }
}

#[derive(Debug, Clone)]
pub struct RefreshTokenResult {
    pub principal: Principal,
    pub access_token: IssuedToken,
}

/// Exchanges a refresh token for a new access token with the same id and
/// role. The token must verify and must still be the one stored for the
/// user.
pub struct RefreshTokenHandler {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenService>,
}

impl RefreshTokenHandler {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<dyn TokenService>) -> Self {
        Self { users, tokens }
    }

    pub async fn handle(&self, cmd: RefreshTokenCommand) -> Result<RefreshTokenResult, AuthError> {
        // 1. Signature and expiry
        let user_id = self.tokens.verify_refresh_token(&cmd.refresh_token)?;

        // 2. Must match the token stored on the user row
        let user = self
            .users
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::InvalidToken)?;
        let stored = user
            .refresh_token
            .as_deref()
            .ok_or(AuthError::InvalidToken)?;
        if !bool::from(stored.as_bytes().ct_eq(cmd.refresh_token.as_bytes())) {
            tracing::warn!(user_id = %user.id, "Refresh token does not match stored token");
            return Err(AuthError::InvalidToken);
        }

        // 3. New access token with the current role
        let principal = Principal::new(user.id, user.role);
        let access_token = self.tokens.issue_access_token(&principal)?;

        tracing::debug!(user_id = %user.id, "Access token refreshed");
        Ok(RefreshTokenResult {
            principal,
            access_token,
        })
    }
}
