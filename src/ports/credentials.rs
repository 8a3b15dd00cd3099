//! Password hashing and token ports.
//!
//! These isolate the access-control workflow from the concrete hashing
//! algorithm and token format.

use async_trait::async_trait;

use crate::domain::account::PasswordHash;
use crate::domain::foundation::{AuthError, DomainError, Principal, Timestamp, UserId};

#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// One-way salted hash of `password`.
    async fn hash(&self, password: &str) -> Result<PasswordHash, DomainError>;

    /// True iff `password` produced `hash`. Malformed hashes verify false.
    async fn verify(&self, password: &str, hash: &PasswordHash) -> bool;
}

/// A signed token and the instant it stops being accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: Timestamp,
}

pub trait TokenService: Send + Sync {
    /// Short-lived token carrying id and role.
    fn issue_access_token(&self, principal: &Principal) -> Result<IssuedToken, DomainError>;

    /// Long-lived token carrying only the id.
    fn issue_refresh_token(&self, user_id: &UserId) -> Result<IssuedToken, DomainError>;

    /// # Errors
    ///
    /// - `Unauthenticated` on bad signature, expiry, or a refresh token
    fn verify_access_token(&self, token: &str) -> Result<Principal, AuthError>;

    /// # Errors
    ///
    /// - `InvalidToken` on bad signature, expiry, or an access token
    fn verify_refresh_token(&self, token: &str) -> Result<UserId, AuthError>;
}
