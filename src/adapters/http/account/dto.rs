//! Request and response bodies for account endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::account::User;
use crate::domain::foundation::{Role, Timestamp, UserId};
use crate::ports::IssuedToken;

/// Public view of an account. Never carries the password hash or the
/// stored refresh token.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub fullname: String,
    pub email: String,
    pub role: Role,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username.as_str().to_string(),
            fullname: user.fullname.as_str().to_string(),
            email: user.email.as_str().to_string(),
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub expires_at: Timestamp,
}

impl From<IssuedToken> for TokenResponse {
    fn from(issued: IssuedToken) -> Self {
        Self {
            token: issued.token,
            expires_at: issued.expires_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub access_token: TokenResponse,
    pub refresh_token: TokenResponse,
}

#[derive(Clone, Deserialize)]
pub struct RefreshRequest {
    #[serde(default, alias = "refreshToken")]
    pub refresh_token: String,
}

impl std::fmt::Debug for RefreshRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshRequest")
            .field("refresh_token", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::{Email, PasswordHash, Username};

    #[test]
    fn user_response_omits_secrets() {
        let mut user = User::new(
            UserId::new(),
            Username::try_new("username", "ana").unwrap(),
            Username::try_new("fullname", "Ana Diaz").unwrap(),
            Email::try_new("ana@example.com").unwrap(),
            PasswordHash::new("argon-hash".to_string()),
            Role::User,
        );
        user.refresh_token = Some("stored-refresh".to_string());

        let json = serde_json::to_string(&UserResponse::from(user)).unwrap();
        assert!(json.contains("ana@example.com"));
        assert!(!json.contains("argon-hash"));
        assert!(!json.contains("stored-refresh"));
    }
}
