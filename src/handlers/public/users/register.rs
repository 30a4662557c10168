// handlers/public/users/register.rs - POST /users/register handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::collections::HashMap;

use crate::auth::password::{hash_password, is_valid_email, unmet_requirements};
use crate::database::models::NewUser;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::types::{AuthResponse, RegisterRequest};

use super::issue_token;

/// POST /users/register - create an account and return a token for it
///
/// Input: `{ "username": "...", "email": "...", "password": "..." }`
///
/// - 400 when a field is missing, the email is malformed or the password
///   misses one of the strength rules
/// - 403 when registration is disabled
/// - 409 when the username or email is taken
pub async fn register_post(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<AuthResponse> {
    if !state.config.security.allow_registration {
        return Err(ApiError::forbidden("Registration is disabled"));
    }

    let Json(request) = payload?;
    let new_user = validate(request)?;
    let username = new_user.username.clone();

    let user = state.users.create(new_user).await?;
    tracing::info!("Registered user {}", username);

    Ok(ApiResponse::created(issue_token(&user, &state.config.security)?))
}

fn validate(request: RegisterRequest) -> Result<NewUser, ApiError> {
    let mut field_errors = HashMap::new();

    let username = request.username.trim().to_string();
    if username.is_empty() {
        field_errors.insert("username".to_string(), "Username is required".to_string());
    }

    let email = request.email.trim().to_lowercase();
    if !is_valid_email(&email) {
        field_errors.insert("email".to_string(), "Enter a valid email address".to_string());
    }

    let unmet = unmet_requirements(&request.password);
    if !unmet.is_empty() {
        field_errors.insert("password".to_string(), unmet.join("; "));
    }

    if !field_errors.is_empty() {
        return Err(ApiError::validation_error("Invalid registration details", Some(field_errors)));
    }

    let password_hash = hash_password(&request.password)?;

    Ok(NewUser {
        username,
        email,
        password_hash,
    })
}
