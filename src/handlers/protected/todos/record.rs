use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};

use crate::database::models::{Item, UpdateItemRequest};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;
use crate::types::DeleteResponse;

use super::utils::{parse_item_id, NOT_FOUND};

/// PUT /todos/:id - partial update of name, description and done
pub async fn put(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateItemRequest>, JsonRejection>,
) -> ApiResult<Item> {
    let id = parse_item_id(&id)?;
    let Json(request) = payload?;
    let patch = request.validate()?;

    let item = state
        .items
        .update(auth.user_id, id, patch)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;

    Ok(ApiResponse::success(item))
}

/// DELETE /todos/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<DeleteResponse> {
    let id = parse_item_id(&id)?;

    if !state.items.delete(auth.user_id, id).await? {
        return Err(ApiError::not_found(NOT_FOUND));
    }

    Ok(ApiResponse::success(DeleteResponse {
        message: "Todo deleted successfully".to_string(),
        id,
    }))
}

/// PATCH /todos/:id/toggle - flip `done`
pub async fn toggle(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Item> {
    let id = parse_item_id(&id)?;

    let item = state
        .items
        .toggle(auth.user_id, id)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;

    Ok(ApiResponse::success(item))
}
