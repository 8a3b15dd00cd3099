//! Authentication types for the domain layer.
//!
//! A [`Principal`] is what survives token verification: the account id and
//! its role. It has no dependency on the token format; any `TokenService`
//! adapter can produce one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::{DomainError, ErrorCode, UserId, ValidationError};
use crate::domain::validation::ValidationReport;

/// Account role. Roles are matched exactly; ADMIN does not imply USER.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "USER" => Ok(Role::User),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("expected ADMIN or USER, got '{}'", other),
            )),
        }
    }
}

/// Authenticated caller extracted from a verified access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: UserId,
    pub role: Role,
}

impl Principal {
    pub fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Authentication and authorization failures.
///
/// # HTTP Status Mapping
///
/// | Variant | HTTP Status |
/// |---------|-------------|
/// | `Unauthenticated` | 401 |
/// | `InvalidToken` | 401 |
/// | `InvalidCredentials` | 401 |
/// | `Forbidden` | 403 |
/// | `EmailTaken` | 409 |
/// | `UserNotFound` | 404 |
/// | `Validation` | 400 |
/// | `Infrastructure` | 500 |
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// No bearer token, or the token does not verify.
    #[error("Unauthenticated")]
    Unauthenticated,

    /// Refresh token is malformed, expired, or no longer the stored one.
    #[error("Invalid Refresh Token")]
    InvalidToken,

    /// Unknown email or wrong password; deliberately indistinguishable.
    #[error("Invalid Credentials")]
    InvalidCredentials,

    /// Authenticated but not allowed to perform the operation.
    #[error("{0}")]
    Forbidden(String),

    #[error("Email already registered")]
    EmailTaken,

    #[error("User not found")]
    UserNotFound(UserId),

    #[error("Validation failed: {0}")]
    Validation(ValidationReport),

    #[error("Internal error: {0}")]
    Infrastructure(String),
}

impl AuthError {
    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden(reason.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        Self::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AuthError::Unauthenticated => ErrorCode::Unauthorized,
            AuthError::InvalidToken => ErrorCode::InvalidToken,
            AuthError::InvalidCredentials => ErrorCode::InvalidCredentials,
            AuthError::Forbidden(_) => ErrorCode::Forbidden,
            AuthError::EmailTaken => ErrorCode::EmailTaken,
            AuthError::UserNotFound(_) => ErrorCode::UserNotFound,
            AuthError::Validation(_) => ErrorCode::ValidationFailed,
            AuthError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }

    /// Returns true if the caller should obtain a fresh token.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::Unauthenticated | AuthError::InvalidToken)
    }
}

impl From<DomainError> for AuthError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => AuthError::Forbidden(err.message),
            ErrorCode::EmailTaken => AuthError::EmailTaken,
            ErrorCode::InvalidToken => AuthError::InvalidToken,
            _ => AuthError::Infrastructure(err.message),
        }
    }
}

impl From<ValidationError> for AuthError {
    fn from(err: ValidationError) -> Self {
        AuthError::Validation(err.into())
    }
}

impl From<ValidationReport> for AuthError {
    fn from(report: ValidationReport) -> Self {
        AuthError::Validation(report)
    }
}
