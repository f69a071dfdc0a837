//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::ApiResponse;
use shared::models::{
    Order, OrderCreate, OrderFull, OrderStats, OrderStatus, OrderStatusUpdate, PaymentStatusUpdate,
};

use crate::core::ServerState;
use crate::db::repository::order;
use crate::orders::place_order;
use crate::utils::{AppError, AppResult, ok, ok_with_message};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderListQuery {
    pub status: Option<OrderStatus>,
}

/// POST /api/orders - checkout: cart -> order, atomically
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<ApiResponse<OrderFull>>> {
    let full = place_order(&state.pool, &state.config.delivery_fees, payload).await?;
    Ok(ok_with_message(full, "Order placed"))
}

/// GET /api/orders/track/:order_number - public receipt lookup
pub async fn track(
    State(state): State<ServerState>,
    Path(order_number): Path<String>,
) -> AppResult<Json<ApiResponse<OrderFull>>> {
    let full = order::find_by_number(&state.pool, &order_number)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {order_number} not found")))?;
    Ok(ok(full))
}

/// GET /api/orders?status= - admin list, newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<ApiResponse<Vec<Order>>>> {
    let orders = order::find_all(&state.pool, query.status).await?;
    Ok(ok(orders))
}

/// GET /api/orders/stats - aggregate dashboard numbers
pub async fn stats(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<OrderStats>>> {
    let stats = order::stats(&state.pool).await?;
    Ok(ok(stats))
}

/// GET /api/orders/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<OrderFull>>> {
    let full = order::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {id} not found")))?;
    Ok(ok(full))
}

/// PATCH /api/orders/:id/status - guarded by the transition matrix
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let updated = order::update_status(&state.pool, id, payload.status).await?;
    Ok(ok(updated))
}

/// PATCH /api/orders/:id/payment-status - independent payment axis
pub async fn update_payment_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<PaymentStatusUpdate>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let updated = order::update_payment_status(&state.pool, id, payload.payment_status).await?;
    Ok(ok(updated))
}
