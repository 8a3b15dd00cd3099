//! LoginHandler - Command handler for exchanging credentials for tokens.

use std::sync::Arc;

use crate::domain::account::User;
use crate::domain::foundation::{AuthError, Principal};
use crate::domain::validation::{validate_login, LoginInput};
use crate::ports::{IssuedToken, PasswordHasher, TokenService, UserRepository};

#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub input: LoginInput,
}

#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: User,
    pub access_token: IssuedToken,
    pub refresh_token: IssuedToken,
}

/// Verifies credentials, issues both tokens and stores the refresh token
/// on the user row. A later login replaces the stored refresh token.
pub struct LoginHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
}

impl LoginHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    pub async fn handle(&self, cmd: LoginCommand) -> Result<LoginResult, AuthError> {
        // 1. Validate
        let credentials = validate_login(&cmd.input)?;

        // 2. Unknown email and wrong password fail the same way
        let mut user = match self.users.find_by_email(&credentials.email).await? {
            Some(user) => user,
            None => {
                tracing::info!("Login rejected");
                return Err(AuthError::InvalidCredentials);
            }
        };
        if !self
            .hasher
            .verify(&credentials.password, &user.password_hash)
            .await
        {
            tracing::info!(user_id = %user.id, "Login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        // 3. Issue tokens and remember the refresh token
        let access_token = self
            .tokens
            .issue_access_token(&Principal::new(user.id, user.role))?;
        let refresh_token = self.tokens.issue_refresh_token(&user.id)?;
        self.users
            .set_refresh_token(&user.id, Some(&refresh_token.token))
            .await?;
        user.refresh_token = Some(refresh_token.token.clone());

        tracing::info!(user_id = %user.id, role = %user.role, "Login succeeded");
        Ok(LoginResult {
            user,
            access_token,
            refresh_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::test_support::{seed_user, FakeHasher, FakeTokens};
    use crate::domain::foundation::{ErrorCode, Role};

    fn handler(store: &Arc<InMemoryStore>) -> LoginHandler {
        LoginHandler::new(store.clone(), Arc::new(FakeHasher), Arc::new(FakeTokens::default()))
    }

    fn login(email: &str, password: &str) -> LoginCommand {
        LoginCommand {
            input: LoginInput {
                email: email.to_string(),
                password: password.to_string(),
            },
        }
    }

    #[tokio::test]
    async fn issues_tokens_and_stores_refresh_token() {
        let store = Arc::new(InMemoryStore::new());
        let user = seed_user(&store, "ana@example.com", Role::Admin).await;

        let result = handler(&store)
            .handle(login("ana@example.com", "secret1"))
            .await
            .unwrap();

        assert_eq!(result.user.id, user.id);
        assert_eq!(
            result.access_token.token,
            format!("access:{}:ADMIN", user.id)
        );
        let stored = UserRepository::find_by_id(&*store, &user.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.refresh_token, Some(result.refresh_token.token));
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_the_same() {
        let store = Arc::new(InMemoryStore::new());
        seed_user(&store, "ana@example.com", Role::User).await;
        let handler = handler(&store);

        let wrong_password = handler
            .handle(login("ana@example.com", "secret2"))
            .await
            .unwrap_err();
        let unknown_email = handler
            .handle(login("bob@example.com", "secret1"))
            .await
            .unwrap_err();

        assert_eq!(wrong_password.code(), ErrorCode::InvalidCredentials);
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn short_password_is_validation_error() {
        let store = Arc::new(InMemoryStore::new());
        let err = handler(&store)
            .handle(login("ana@example.com", "123"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }
}
