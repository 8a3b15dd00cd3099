//! Account domain module.
//!
//! Users sign up with a role, log in with email and password, and hold at
//! most one live refresh token.

mod email;
mod user;

pub use email::Email;
pub use user::{PasswordHash, User, Username};
