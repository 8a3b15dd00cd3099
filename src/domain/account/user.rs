//! User aggregate.

use std::fmt;

use crate::domain::foundation::{OwnedByUser, Role, Timestamp, UserId, ValidationError};

use super::Email;

/// Display name or full name, 1 to 50 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    pub const MAX_CHARS: usize = 50;

    pub fn try_new(field: &str, raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        let value = raw.trim();
        if value.is_empty() {
            return Err(ValidationError::empty_field(field));
        }
        let len = value.chars().count();
        if len > Self::MAX_CHARS {
            return Err(ValidationError::out_of_range(
                field,
                1,
                Self::MAX_CHARS as i64,
                len as i64,
            ));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Encoded one-way password hash (PHC string). Never the plain password.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(***)")
    }
}

/// Account record.
///
/// Intentionally not `Serialize`; HTTP responses go through DTOs that omit
/// the password hash and refresh token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub fullname: Username,
    pub email: Email,
    pub password_hash: PasswordHash,
    pub role: Role,
    pub refresh_token: Option<String>,
    pub created_at: Timestamp,
}

impl User {
    pub fn new(
        id: UserId,
        username: Username,
        fullname: Username,
        email: Email,
        password_hash: PasswordHash,
        role: Role,
    ) -> Self {
        Self {
            id,
            username,
            fullname,
            email,
            password_hash,
            role,
            refresh_token: None,
            created_at: Timestamp::now(),
        }
    }
}

impl OwnedByUser for User {
    fn owner_id(&self) -> &UserId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_bounds() {
        assert!(Username::try_new("username", "").is_err());
        assert!(Username::try_new("username", "a".repeat(50)).is_ok());
        let err = Username::try_new("fullname", "a".repeat(51)).unwrap_err();
        assert_eq!(err.field(), "fullname");
    }

    #[test]
    fn password_hash_debug_is_redacted() {
        let hash = PasswordHash::new("$argon2id$v=19$secret");
        assert_eq!(format!("{:?}", hash), "PasswordHash(***)");
    }

    #[test]
    fn user_owns_itself() {
        let user = User::new(
            UserId::new(),
            Username::try_new("username", "ana").unwrap(),
            Username::try_new("fullname", "Ana Lima").unwrap(),
            Email::try_new("ana@example.com").unwrap(),
            PasswordHash::new("x"),
            Role::User,
        );
        assert!(user.is_owner(&user.id));
        assert!(user.refresh_token.is_none());
    }
}
