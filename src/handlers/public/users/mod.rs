// handlers/public/users/mod.rs - Token acquisition endpoints

pub mod login;    // POST /users/login - authenticate and get JWT
pub mod register; // POST /users/register - create account and get JWT

pub use login::login_post;
pub use register::register_post;

use crate::auth::{generate_jwt, Claims};
use crate::config::SecurityConfig;
use crate::database::models::User;
use crate::error::ApiError;
use crate::types::AuthResponse;

/// Issue a token for `user` and pair it with the public profile
pub(crate) fn issue_token(user: &User, security: &SecurityConfig) -> Result<AuthResponse, ApiError> {
    let claims = Claims::new(user.id, user.username.clone(), security);
    let token = generate_jwt(&claims, security)?;
    Ok(AuthResponse {
        token,
        user: user.to_public(),
    })
}
