//! HS256 JWT implementation of the TokenService port.
//!
//! Access and refresh tokens share the signing key but carry a `typ` claim,
//! so one is never accepted in place of the other.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::domain::foundation::{AuthError, DomainError, ErrorCode, Principal, Role, Timestamp, UserId};
use crate::ports::{IssuedToken, TokenService};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<Role>,
    typ: TokenKind,
    iss: String,
    iat: i64,
    exp: i64,
    /// Makes two tokens issued in the same second distinct.
    jti: String,
}

pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl JwtTokenService {
    pub fn new(secret: &[u8], issuer: impl Into<String>, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            issuer: issuer.into(),
            access_ttl,
            refresh_ttl,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            config.jwt_secret.expose_secret().as_bytes(),
            config.issuer.clone(),
            config.access_token_ttl(),
            config.refresh_token_ttl(),
        )
    }

    fn issue(&self, sub: &UserId, role: Option<Role>, typ: TokenKind, ttl: Duration) -> Result<IssuedToken, DomainError> {
        let now = Timestamp::now();
        let expires_at = now.plus_seconds(ttl.as_secs() as i64);
        let claims = Claims {
            sub: sub.to_string(),
            role,
            typ,
            iss: self.issuer.clone(),
            iat: now.unix_seconds(),
            exp: expires_at.unix_seconds(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign token");
            DomainError::new(ErrorCode::InternalError, "Failed to sign token")
        })?;

        Ok(IssuedToken { token, expires_at })
    }

    fn verify(&self, token: &str, expected: TokenKind) -> Option<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => tracing::debug!("Token expired"),
                    _ => tracing::warn!(error = %e, "Token validation failed"),
                }
            })
            .ok()?
            .claims;

        if claims.typ != expected {
            tracing::warn!(?expected, actual = ?claims.typ, "Token used as the wrong kind");
            return None;
        }
        Some(claims)
    }
}

fn subject(claims: &Claims) -> Option<UserId> {
    claims.sub.parse::<UserId>().ok()
}

impl TokenService for JwtTokenService {
    fn issue_access_token(&self, principal: &Principal) -> Result<IssuedToken, DomainError> {
        self.issue(&principal.id, Some(principal.role), TokenKind::Access, self.access_ttl)
    }

    fn issue_refresh_token(&self, user_id: &UserId) -> Result<IssuedToken, DomainError> {
        self.issue(user_id, None, TokenKind::Refresh, self.refresh_ttl)
    }

    fn verify_access_token(&self, token: &str) -> Result<Principal, AuthError> {
        let claims = self.verify(token, TokenKind::Access).ok_or(AuthError::Unauthenticated)?;
        let id = subject(&claims).ok_or(AuthError::Unauthenticated)?;
        let role = claims.role.ok_or(AuthError::Unauthenticated)?;
        Ok(Principal::new(id, role))
    }

    fn verify_refresh_token(&self, token: &str) -> Result<UserId, AuthError> {
        let claims = self.verify(token, TokenKind::Refresh).ok_or(AuthError::InvalidToken)?;
        subject(&claims).ok_or(AuthError::InvalidToken)
    }
}

impl std::fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("issuer", &self.issuer)
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

    fn service() -> JwtTokenService {
        JwtTokenService::new(SECRET, "event-ticketing", Duration::from_secs(60), Duration::from_secs(600))
    }

    #[test]
    fn access_token_round_trips_principal() {
        let svc = service();
        let principal = Principal::new(UserId::new(), Role::Admin);
        let issued = svc.issue_access_token(&principal).unwrap();
        assert_eq!(svc.verify_access_token(&issued.token).unwrap(), principal);
    }

    #[test]
    fn refresh_token_round_trips_user_id() {
        let svc = service();
        let user_id = UserId::new();
        let issued = svc.issue_refresh_token(&user_id).unwrap();
        assert_eq!(svc.verify_refresh_token(&issued.token).unwrap(), user_id);
    }

    #[test]
    fn token_kinds_are_not_interchangeable() {
        let svc = service();
        let user_id = UserId::new();
        let refresh = svc.issue_refresh_token(&user_id).unwrap();
        let access = svc.issue_access_token(&Principal::new(user_id, Role::User)).unwrap();

        assert!(matches!(
            svc.verify_access_token(&refresh.token),
            Err(AuthError::Unauthenticated)
        ));
        assert!(matches!(
            svc.verify_refresh_token(&access.token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn wrong_key_is_rejected() {
        let other = JwtTokenService::new(
            b"another-secret-another-secret-xx",
            "event-ticketing",
            Duration::from_secs(60),
            Duration::from_secs(600),
        );
        let issued = other.issue_refresh_token(&UserId::new()).unwrap();
        assert!(service().verify_refresh_token(&issued.token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let svc = JwtTokenService::new(SECRET, "event-ticketing", Duration::ZERO, Duration::ZERO);
        let issued = svc.issue_refresh_token(&UserId::new()).unwrap();
        std::thread::sleep(Duration::from_millis(1100));
        assert!(matches!(
            svc.verify_refresh_token(&issued.token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn consecutive_refresh_tokens_differ() {
        let svc = service();
        let user_id = UserId::new();
        let a = svc.issue_refresh_token(&user_id).unwrap();
        let b = svc.issue_refresh_token(&user_id).unwrap();
        assert_ne!(a.token, b.token);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(service().verify_access_token("not-a-jwt").is_err());
    }
}
