use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};

use crate::database::models::{CreateItemRequest, Item};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /todos - every item of the caller, newest first
pub async fn get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<Vec<Item>> {
    let items = state.items.list(auth.user_id).await?;
    Ok(ApiResponse::success(items))
}

/// POST /todos - create an item owned by the caller
pub async fn post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    payload: Result<Json<CreateItemRequest>, JsonRejection>,
) -> ApiResult<Item> {
    let Json(request) = payload?;
    let new_item = request.validate()?;

    let item = state.items.insert(auth.user_id, new_item).await?;
    tracing::debug!("User {} created {} {}", auth.username, item.item_type, item.id);

    Ok(ApiResponse::created(item))
}
