//! Role and ownership checks.
//!
//! `authorize` and `authorize_ownership` are pure; they return an
//! [`AuthorizationResult`] that carries enough context to be logged before
//! it is turned into a `Result`.

use super::{DomainError, ErrorCode, Principal, Role, UserId};

/// Result of an authorization check.
#[derive(Debug, Clone)]
pub struct AuthorizationResult {
    /// Whether access was granted.
    pub granted: bool,

    /// What was being accessed ("role:ADMIN", "Registration", ...).
    pub resource: String,

    /// The caller.
    pub user_id: UserId,

    /// Reason for denial, if denied.
    pub denial_reason: Option<String>,
}

impl AuthorizationResult {
    pub fn granted(resource: impl Into<String>, user_id: UserId) -> Self {
        Self {
            granted: true,
            resource: resource.into(),
            user_id,
            denial_reason: None,
        }
    }

    pub fn denied(resource: impl Into<String>, user_id: UserId, reason: impl Into<String>) -> Self {
        Self {
            granted: false,
            resource: resource.into(),
            user_id,
            denial_reason: Some(reason.into()),
        }
    }

    pub fn is_granted(&self) -> bool {
        self.granted
    }

    /// Converts to `Ok(())` when granted, `Err(Forbidden)` otherwise.
    pub fn into_result(self) -> Result<(), DomainError> {
        if self.granted {
            return Ok(());
        }
        Err(DomainError::new(
            ErrorCode::Forbidden,
            self.denial_reason
                .unwrap_or_else(|| "Access denied".to_string()),
        )
        .with_detail("resource", self.resource)
        .with_detail("user_id", self.user_id.to_string()))
    }
}

/// Grants access iff the principal's role equals `required`.
pub fn authorize(principal: &Principal, required: Role) -> AuthorizationResult {
    let resource = format!("role:{}", required);
    if principal.role == required {
        AuthorizationResult::granted(resource, principal.id)
    } else {
        AuthorizationResult::denied(
            resource,
            principal.id,
            format!("Requires {} role", required),
        )
    }
}

/// Grants access iff the principal is the owner of the resource.
pub fn authorize_ownership(principal: &Principal, owner_id: &UserId) -> AuthorizationResult {
    if &principal.id == owner_id {
        AuthorizationResult::granted(format!("owner:{}", owner_id), principal.id)
    } else {
        AuthorizationResult::denied(
            format!("owner:{}", owner_id),
            principal.id,
            "You are not allowed to access this resource",
        )
    }
}
