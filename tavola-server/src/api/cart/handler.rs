//! Cart API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use shared::ApiResponse;
use shared::models::{CartClear, CartItemAdd, CartItemQuantity, CartSummary};

use crate::core::ServerState;
use crate::db::repository::cart;
use crate::utils::validation::{
    MAX_SHORT_TEXT_LEN, validate_quantity, validate_required_text,
};
use crate::utils::{AppResult, ok, ok_with_message};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartQuery {
    pub session_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryQuery {
    pub distance: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryCharges {
    pub distance: f64,
    pub delivery_charges: f64,
}

/// GET /api/cart?sessionId= - the session's cart, created lazily
pub async fn get_cart(
    State(state): State<ServerState>,
    Query(query): Query<CartQuery>,
) -> AppResult<Json<ApiResponse<CartSummary>>> {
    validate_required_text(&query.session_id, "sessionId", MAX_SHORT_TEXT_LEN)?;
    cart::get_or_create(&state.pool, &query.session_id).await?;
    let summary = cart::summary(&state.pool, &query.session_id).await?;
    Ok(ok(summary))
}

/// POST /api/cart - add an item; an existing line gains the quantity
pub async fn add_item(
    State(state): State<ServerState>,
    Json(payload): Json<CartItemAdd>,
) -> AppResult<Json<ApiResponse<CartSummary>>> {
    validate_required_text(&payload.session_id, "sessionId", MAX_SHORT_TEXT_LEN)?;
    validate_quantity(payload.quantity)?;

    let summary = cart::add_item(
        &state.pool,
        &payload.session_id,
        payload.food_item_id,
        payload.quantity,
    )
    .await?;
    Ok(ok_with_message(summary, "Item added to cart"))
}

/// PUT /api/cart/:id - update a line's quantity (<= 0 removes it)
pub async fn update_item(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CartItemQuantity>,
) -> AppResult<Json<ApiResponse<bool>>> {
    cart::update_item(&state.pool, id, payload.quantity).await?;
    Ok(ok(true))
}

/// DELETE /api/cart/:id - remove a line
pub async fn remove_item(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<bool>>> {
    cart::remove_item(&state.pool, id).await?;
    Ok(ok(true))
}

/// DELETE /api/cart - empty the session's cart (no-op when absent)
pub async fn clear(
    State(state): State<ServerState>,
    Json(payload): Json<CartClear>,
) -> AppResult<Json<ApiResponse<bool>>> {
    validate_required_text(&payload.session_id, "sessionId", MAX_SHORT_TEXT_LEN)?;
    cart::clear(&state.pool, &payload.session_id).await?;
    Ok(ok_with_message(true, "Cart cleared"))
}

/// GET /api/delivery-charges?distance= - tiered fee estimate
pub async fn delivery_charges(
    State(state): State<ServerState>,
    Query(query): Query<DeliveryQuery>,
) -> AppResult<Json<ApiResponse<DeliveryCharges>>> {
    let fee = state.config.delivery_fees.charge(query.distance)?;
    Ok(ok(DeliveryCharges {
        distance: query.distance,
        delivery_charges: fee,
    }))
}
