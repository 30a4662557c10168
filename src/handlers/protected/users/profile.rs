// handlers/protected/users/profile.rs - GET /users/profile handler

use axum::{extract::State, Extension};

use crate::database::models::PublicUser;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /users/profile - the account behind the presented token
pub async fn profile_get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<PublicUser> {
    // A valid token can outlive its account
    let user = state
        .users
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("User no longer exists"))?;

    Ok(ApiResponse::success(user.to_public()))
}
