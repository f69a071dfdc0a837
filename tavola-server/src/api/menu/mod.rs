//! Public menu endpoint
//!
//! Serves active categories plus available food items through the TTL
//! cache: within the freshness window every request is a cache hit, and
//! concurrent cold reads share a single database fetch.

use axum::{Json, Router, extract::State, routing::get};
use shared::ApiResponse;
use shared::models::Menu;

use crate::core::ServerState;
use crate::db::repository::food_item::FoodItemFilter;
use crate::db::repository::{RepoError, category, food_item};
use crate::utils::{AppResult, ok};

/// Cache key for the assembled menu
pub const MENU_CACHE_KEY: &str = "public-menu";

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/menu", get(menu))
}

async fn menu(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Menu>>> {
    let pool = state.pool.clone();
    let menu = state
        .menu_cache
        .get_or_fetch(MENU_CACHE_KEY, || async move {
            let categories = category::find_all(&pool, false).await?;
            let food_items = food_item::find_all(
                &pool,
                &FoodItemFilter {
                    available_only: true,
                    ..Default::default()
                },
            )
            .await?;
            Ok::<_, RepoError>(Menu {
                categories,
                food_items,
            })
        })
        .await?;

    Ok(ok(menu))
}
