//! SignUpHandler - Command handler for creating an account.

use std::sync::Arc;

use crate::domain::account::User;
use crate::domain::foundation::{AuthError, UserId};
use crate::domain::validation::{validate_sign_up, SignUpInput};
use crate::ports::{PasswordHasher, UserRepository};

#[derive(Debug, Clone)]
pub struct SignUpCommand {
    pub input: SignUpInput,
}

pub struct SignUpHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl SignUpHandler {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    pub async fn handle(&self, cmd: SignUpCommand) -> Result<User, AuthError> {
        // 1. Validate
        let sign_up = validate_sign_up(&cmd.input)?;

        // 2. Cheap uniqueness check before paying for the hash
        if self.users.find_by_email(&sign_up.email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        // 3. Hash and persist; the store's unique email constraint is final
        let password_hash = self.hasher.hash(&sign_up.password).await?;
        let user = User::new(
            UserId::new(),
            sign_up.username,
            sign_up.fullname,
            sign_up.email,
            password_hash,
            sign_up.role,
        );
        self.users.create(&user).await?;

        tracing::info!(user_id = %user.id, role = %user.role, "Account created");
        Ok(user)
    }
}
