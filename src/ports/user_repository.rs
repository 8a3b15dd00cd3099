//! User repository port.

use async_trait::async_trait;

use crate::domain::account::{Email, User};
use crate::domain::foundation::{DomainError, UserId};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account.
    ///
    /// # Errors
    ///
    /// - `EmailTaken` if another account uses the email
    async fn create(&self, user: &User) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError>;

    /// Store (or clear) the user's refresh token in a single write.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the user doesn't exist
    async fn set_refresh_token(&self, id: &UserId, token: Option<&str>) -> Result<(), DomainError>;

    async fn list_all(&self) -> Result<Vec<User>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn UserRepository) {}
    }
}
