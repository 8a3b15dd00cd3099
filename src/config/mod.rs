//! Typed configuration read from the environment.
//!
//! Variables use the `EVENT_TICKETING__` prefix and `__` between nesting
//! levels. A `.env` file in the working directory is loaded first when
//! present.
//!
//! ```no_run
//! use event_ticketing::config::AppConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! config.validate()?;
//! # Ok(())
//! # }
//! ```

mod auth;
mod database;
mod error;
mod server;
mod storage;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{LogFormat, ServerConfig};
pub use storage::StorageConfig;

use serde::Deserialize;

const ENV_PREFIX: &str = "EVENT_TICKETING";

/// Root configuration. `database.url` and `auth.jwt_secret` have no
/// defaults; every other value does.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Read `.env` (if any) and the process environment.
    ///
    /// `EVENT_TICKETING__DATABASE__URL=postgres://…` sets `database.url`,
    /// `EVENT_TICKETING__STORAGE__MAX_UPLOAD_BYTES=1048576` sets
    /// `storage.max_upload_bytes`, and so on.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let source = config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__");

        Ok(config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?)
    }

    /// Check every section; the first failure wins.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate()?;
        self.storage.validate()
    }
}
