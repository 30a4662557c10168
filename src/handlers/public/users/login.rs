// handlers/public/users/login.rs - POST /users/login handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::auth::password::verify_password;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::types::{AuthResponse, LoginRequest};

use super::issue_token;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// POST /users/login - authenticate by username or email and receive a token
///
/// Unknown users and wrong passwords get the same 401 so the endpoint does
/// not reveal which accounts exist.
pub async fn login_post(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<AuthResponse> {
    let Json(request) = payload?;

    let login = request.login.trim();
    if login.is_empty() || request.password.is_empty() {
        return Err(ApiError::bad_request("Username/email and password are required"));
    }

    let user = state
        .users
        .find_by_login(login)
        .await?
        .ok_or_else(|| ApiError::unauthorized(INVALID_CREDENTIALS))?;

    if !verify_password(&request.password, &user.password_hash) {
        tracing::info!("Failed login for {}", login);
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    Ok(ApiResponse::success(issue_token(&user, &state.config.security)?))
}
