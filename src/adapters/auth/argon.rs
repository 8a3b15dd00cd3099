//! Argon2id implementation of the PasswordHasher port.
//!
//! Hashing is CPU-bound, so both operations run on the blocking pool.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash as PhcString, PasswordHasher as _, PasswordVerifier, SaltString};
use argon2::Argon2;
use async_trait::async_trait;

use crate::domain::account::PasswordHash;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::PasswordHasher;

#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, DomainError> {
        let password = password.to_owned();
        let encoded = tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::default()
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
        })
        .await
        .map_err(|e| DomainError::new(ErrorCode::InternalError, format!("Hashing task failed: {}", e)))?
        .map_err(|e| {
            tracing::error!(error = %e, "Password hashing failed");
            DomainError::new(ErrorCode::InternalError, "Password hashing failed")
        })?;

        Ok(PasswordHash::new(encoded))
    }

    async fn verify(&self, password: &str, hash: &PasswordHash) -> bool {
        let password = password.to_owned();
        let encoded = hash.as_str().to_owned();
        tokio::task::spawn_blocking(move || match PhcString::new(&encoded) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash is malformed");
                false
            }
        })
        .await
        .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_then_verify() {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash("secret-pass").await.unwrap();

        assert!(hash.as_str().starts_with("$argon2id$"));
        assert!(hasher.verify("secret-pass", &hash).await);
        assert!(!hasher.verify("wrong-pass", &hash).await);
    }

    #[tokio::test]
    async fn same_password_gets_distinct_salts() {
        let hasher = Argon2PasswordHasher::new();
        let a = hasher.hash("secret-pass").await.unwrap();
        let b = hasher.hash("secret-pass").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn malformed_hash_verifies_false() {
        let hasher = Argon2PasswordHasher::new();
        assert!(!hasher.verify("anything", &PasswordHash::new("plaintext")).await);
    }
}
