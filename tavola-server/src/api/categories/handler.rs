//! Category API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::ApiResponse;
use shared::models::{Category, CategoryCreate, CategoryUpdate};

use crate::api::menu::MENU_CACHE_KEY;
use crate::core::ServerState;
use crate::db::repository::category;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_URL_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ok, ok_with_message};

/// GET /api/categories - active categories (customer surface)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<Category>>>> {
    let categories = category::find_all(&state.pool, false).await?;
    Ok(ok(categories))
}

/// GET /api/categories/all - every category (admin surface)
pub async fn list_all(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<Category>>>> {
    let categories = category::find_all(&state.pool, true).await?;
    Ok(ok(categories))
}

/// GET /api/categories/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Category>>> {
    let cat = category::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Category {id} not found")))?;
    Ok(ok(cat))
}

/// POST /api/categories
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<Json<ApiResponse<Category>>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.image, "image", MAX_URL_LEN)?;

    let cat = category::create(&state.pool, payload).await?;
    state.menu_cache.invalidate(MENU_CACHE_KEY);
    Ok(ok_with_message(cat, "Category created"))
}

/// PUT /api/categories/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CategoryUpdate>,
) -> AppResult<Json<ApiResponse<Category>>> {
    if let Some(ref name) = payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.image, "image", MAX_URL_LEN)?;

    let cat = category::update(&state.pool, id, payload).await?;
    state.menu_cache.invalidate(MENU_CACHE_KEY);
    Ok(ok(cat))
}

/// PATCH /api/categories/:id/toggle
pub async fn toggle(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Category>>> {
    let cat = category::toggle(&state.pool, id).await?;
    state.menu_cache.invalidate(MENU_CACHE_KEY);
    Ok(ok(cat))
}

/// DELETE /api/categories/:id - refused while food items reference it
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let deleted = category::delete(&state.pool, id).await?;
    state.menu_cache.invalidate(MENU_CACHE_KEY);
    Ok(ok_with_message(deleted, "Category deleted"))
}
