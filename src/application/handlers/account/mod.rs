//! Account handlers: sign up, login, token refresh and self lookup.

mod get_user;
mod login;
mod refresh_token;
mod sign_up;

pub use get_user::{GetUserHandler, GetUserQuery};
pub use login::{LoginCommand, LoginHandler, LoginResult};
pub use refresh_token::{RefreshTokenCommand, RefreshTokenHandler, RefreshTokenResult};
pub use sign_up::{SignUpCommand, SignUpHandler};
