//! HTTP listener and logging settings.

use serde::Deserialize;
use std::net::SocketAddr;

use super::error::ValidationError;

/// Upper bound on `request_timeout_secs`. Image uploads are the slowest
/// requests and are bounded separately by the storage timeout.
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Listener, logging and CORS settings.
///
/// Every field has a default, so an empty `EVENT_TICKETING__SERVER__*`
/// environment still yields a runnable server on `0.0.0.0:8080`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    /// `tracing` filter directive, overridden by `RUST_LOG` when set
    pub log_level: String,

    pub log_format: LogFormat,

    pub request_timeout_secs: u64,

    /// Comma-separated list of allowed origins; unset allows any origin
    pub cors_origins: Option<String>,
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info,event_ticketing=debug,sqlx=warn,tower_http=info".to_string(),
            log_format: LogFormat::Text,
            request_timeout_secs: 30,
            cors_origins: None,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ValidationError::InvalidBindAddress(self.host.clone()))
    }

    /// Allowed CORS origins with blanks dropped.
    pub fn cors_origins_list(&self) -> Vec<String> {
        let Some(raw) = &self.cors_origins else {
            return Vec::new();
        };
        raw.split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        self.socket_addr().map(|_| ())
    }
}
