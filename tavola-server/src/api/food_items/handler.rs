//! Food Item API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::ApiResponse;
use shared::ListQuery;
use shared::models::{FoodItemCreate, FoodItemDetail, FoodItemUpdate};

use crate::api::menu::MENU_CACHE_KEY;
use crate::core::ServerState;
use crate::db::repository::food_item;
use crate::db::repository::food_item::FoodItemFilter;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_URL_LEN, validate_optional_text, validate_price,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, ok, ok_with_message};

fn filter_from_query(query: &ListQuery, available_only: bool) -> FoodItemFilter {
    FoodItemFilter {
        available_only,
        category_id: query.category_id,
        search: query.search.clone(),
        limit: Some(query.limit()),
        offset: query.offset(),
    }
}

/// GET /api/food-items?categoryId=&search= - orderable items (customer surface)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Vec<FoodItemDetail>>>> {
    let items = food_item::find_all(&state.pool, &filter_from_query(&query, true)).await?;
    Ok(ok(items))
}

/// GET /api/food-items/all - every item (admin surface)
pub async fn list_all(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Vec<FoodItemDetail>>>> {
    let items = food_item::find_all(&state.pool, &filter_from_query(&query, false)).await?;
    Ok(ok(items))
}

/// GET /api/food-items/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<FoodItemDetail>>> {
    let item = food_item::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Food item {id} not found")))?;
    Ok(ok(item))
}

/// POST /api/food-items
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<FoodItemCreate>,
) -> AppResult<Json<ApiResponse<FoodItemDetail>>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.image, "image", MAX_URL_LEN)?;
    validate_price(payload.price, "price")?;

    let item = food_item::create(&state.pool, payload).await?;
    state.menu_cache.invalidate(MENU_CACHE_KEY);
    Ok(ok_with_message(item, "Food item created"))
}

/// PUT /api/food-items/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<FoodItemUpdate>,
) -> AppResult<Json<ApiResponse<FoodItemDetail>>> {
    if let Some(ref name) = payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.image, "image", MAX_URL_LEN)?;
    if let Some(price) = payload.price {
        validate_price(price, "price")?;
    }

    let item = food_item::update(&state.pool, id, payload).await?;
    state.menu_cache.invalidate(MENU_CACHE_KEY);
    Ok(ok(item))
}

/// PATCH /api/food-items/:id/toggle
pub async fn toggle(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<FoodItemDetail>>> {
    let item = food_item::toggle_availability(&state.pool, id).await?;
    state.menu_cache.invalidate(MENU_CACHE_KEY);
    Ok(ok(item))
}

/// DELETE /api/food-items/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let deleted = food_item::delete(&state.pool, id).await?;
    state.menu_cache.invalidate(MENU_CACHE_KEY);
    Ok(ok_with_message(deleted, "Food item deleted"))
}
