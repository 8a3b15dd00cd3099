//! Authentication adapters.
//!
//! - `argon` - Argon2id `PasswordHasher`
//! - `jwt` - HS256 `TokenService`

mod argon;
mod jwt;

pub use argon::Argon2PasswordHasher;
pub use jwt::JwtTokenService;
