//! Authentication middleware and extractors for axum.
//!
//! This module provides:
//! - `auth_middleware` - Layer that verifies Bearer access tokens and injects
//!   the `Principal` into request extensions
//! - `RequireAuth` - Extractor for any authenticated caller
//! - `RequireAdmin` / `RequireUser` - Extractors that also demand an exact role
//!
//! ```text
//! Request → auth_middleware → injects Principal into extensions
//!                                      ↓
//!                     Handler → RequireUser extractor reads from extensions
//! ```
//!
//! Roles are matched exactly: an ADMIN token does not pass `RequireUser`.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::domain::foundation::{authorize, Principal, Role};
use crate::ports::TokenService;

use super::super::response::ApiError;

/// Auth middleware state - wraps the token service.
pub type AuthState = Arc<dyn TokenService>;

/// Authentication middleware that verifies Bearer tokens.
///
/// 1. Reads the `Authorization: Bearer <token>` header
/// 2. Verifies the token as an access token
/// 3. On success, injects the `Principal` into request extensions
/// 4. On a missing header, continues so public routes still work
/// 5. On a malformed header or a bad token, answers 401
pub async fn auth_middleware(
    State(tokens): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let header = match request.headers().get(header::AUTHORIZATION) {
        Some(value) => value,
        None => return next.run(request).await,
    };

    let token = header
        .to_str()
        .ok()
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    let Some(token) = token else {
        return ApiError::unauthenticated("Invalid token").into_response();
    };

    match tokens.verify_access_token(token) {
        Ok(principal) => {
            request.extensions_mut().insert(principal);
            next.run(request).await
        }
        Err(err) => {
            tracing::debug!(error = %err, "access token rejected");
            ApiError::unauthenticated("Invalid token").into_response()
        }
    }
}

fn principal_from(parts: &Parts) -> Result<Principal, ApiError> {
    parts
        .extensions
        .get::<Principal>()
        .copied()
        .ok_or_else(|| ApiError::unauthenticated("Authorization header is missing"))
}

fn require_role(parts: &Parts, role: Role) -> Result<Principal, ApiError> {
    let principal = principal_from(parts)?;
    let access = authorize(&principal, role);
    if !access.is_granted() {
        tracing::warn!(
            user_id = %principal.id,
            resource = %access.resource,
            "role check denied"
        );
        return Err(ApiError::forbidden("Forbidden"));
    }
    Ok(principal)
}

/// Extractor that requires any authenticated caller.
#[derive(Debug, Clone, Copy)]
pub struct RequireAuth(pub Principal);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        principal_from(parts).map(RequireAuth)
    }
}

/// Extractor that requires the ADMIN role.
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin(pub Principal);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_role(parts, Role::Admin).map(RequireAdmin)
    }
}

/// Extractor that requires the USER role.
#[derive(Debug, Clone, Copy)]
pub struct RequireUser(pub Principal);

#[async_trait]
impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_role(parts, Role::User).map(RequireUser)
    }
}
