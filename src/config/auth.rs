//! Authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Token signing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret shared by access and refresh tokens
    pub jwt_secret: SecretString,

    /// Access token lifetime in seconds
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_secs: u64,

    /// Refresh token lifetime in seconds
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_secs: u64,

    /// Value of the `iss` claim
    #[serde(default = "default_issuer")]
    pub issuer: String,
}

impl AuthConfig {
    pub fn access_token_ttl(&self) -> Duration {
        Duration::from_secs(self.access_token_ttl_secs)
    }

    pub fn refresh_token_ttl(&self) -> Duration {
        Duration::from_secs(self.refresh_token_ttl_secs)
    }

    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if secret.len() < 32 {
            return Err(ValidationError::JwtSecretTooShort);
        }
        if self.access_token_ttl_secs == 0
            || self.access_token_ttl_secs >= self.refresh_token_ttl_secs
        {
            return Err(ValidationError::InvalidTokenLifetimes);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: SecretString::new(String::new()),
            access_token_ttl_secs: default_access_ttl(),
            refresh_token_ttl_secs: default_refresh_ttl(),
            issuer: default_issuer(),
        }
    }
}

fn default_access_ttl() -> u64 {
    60 * 60
}

fn default_refresh_ttl() -> u64 {
    7 * 24 * 60 * 60
}

fn default_issuer() -> String {
    "event-ticketing".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_secret(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: SecretString::new(secret.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_auth_config_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.access_token_ttl(), Duration::from_secs(3600));
        assert_eq!(config.refresh_token_ttl(), Duration::from_secs(604_800));
    }

    #[test]
    fn test_missing_secret() {
        assert_eq!(
            AuthConfig::default().validate(),
            Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"))
        );
    }

    #[test]
    fn test_short_secret() {
        assert_eq!(
            with_secret("too-short").validate(),
            Err(ValidationError::JwtSecretTooShort)
        );
    }

    #[test]
    fn test_access_must_outlive_nothing_and_refresh_must_outlive_access() {
        let mut config = with_secret(&"k".repeat(32));
        assert!(config.validate().is_ok());
        config.access_token_ttl_secs = config.refresh_token_ttl_secs;
        assert_eq!(config.validate(), Err(ValidationError::InvalidTokenLifetimes));
    }

    #[test]
    fn test_debug_does_not_leak_secret() {
        let config = with_secret("super-secret-signing-key-0123456789");
        assert!(!format!("{:?}", config).contains("super-secret"));
    }
}
