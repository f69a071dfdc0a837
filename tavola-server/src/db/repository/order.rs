//! Order Repository
//!
//! Storage for orders and their frozen line items. `persist` is the one
//! multi-write operation in the system: order row, line items and cart
//! clearing commit or roll back together, so a partially created order is
//! never observable.

use super::{RepoError, RepoResult};
use crate::utils::now_ms;
use shared::models::{
    Order, OrderFull, OrderItem, OrderStats, OrderStatus, PaymentMethod, PaymentStatus,
};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, order_number, customer_name, customer_phone, customer_email, \
                       delivery_address, latitude, longitude, distance, subtotal, \
                       delivery_charges, discount, total, status, payment_method, \
                       payment_status, notes, deal_id, created_at, updated_at";

const ITEM_COLUMNS: &str = "oi.id, oi.order_id, oi.food_item_id, oi.name, oi.quantity, \
                            oi.price, oi.total, f.image, c.name AS category_name";

/// Order row to be inserted (status and payment start as PENDING)
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub order_number: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub delivery_address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub distance: Option<f64>,
    pub subtotal: f64,
    pub delivery_charges: f64,
    pub discount: f64,
    pub total: f64,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
    pub deal_id: Option<i64>,
}

/// Line item to be inserted alongside the order
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub food_item_id: i64,
    pub name: String,
    pub quantity: i32,
    pub price: f64,
    pub total: f64,
}

/// Atomically insert the order with its items and empty the source cart.
///
/// Returns the new order id. Any failure rolls the whole write back: no
/// order row, no order items, cart untouched.
pub async fn persist(
    pool: &SqlitePool,
    order: &NewOrder,
    items: &[NewOrderItem],
    cart_id: i64,
) -> RepoResult<i64> {
    let mut tx = pool.begin().await?;
    let now = now_ms();

    let order_id: i64 = sqlx::query_scalar(
        "INSERT INTO customer_order \
         (order_number, customer_name, customer_phone, customer_email, delivery_address, \
          latitude, longitude, distance, subtotal, delivery_charges, discount, total, \
          status, payment_method, payment_status, notes, deal_id, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(&order.order_number)
    .bind(&order.customer_name)
    .bind(&order.customer_phone)
    .bind(&order.customer_email)
    .bind(&order.delivery_address)
    .bind(order.latitude)
    .bind(order.longitude)
    .bind(order.distance)
    .bind(order.subtotal)
    .bind(order.delivery_charges)
    .bind(order.discount)
    .bind(order.total)
    .bind(OrderStatus::Pending)
    .bind(order.payment_method)
    .bind(PaymentStatus::Pending)
    .bind(&order.notes)
    .bind(order.deal_id)
    .bind(now)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    for item in items {
        sqlx::query(
            "INSERT INTO order_item (order_id, food_item_id, name, quantity, price, total) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(order_id)
        .bind(item.food_item_id)
        .bind(&item.name)
        .bind(item.quantity)
        .bind(item.price)
        .bind(item.total)
        .execute(&mut *tx)
        .await?;
    }

    sqlx::query("DELETE FROM cart_item WHERE cart_id = ?")
        .bind(cart_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(order_id)
}

pub async fn find_all(pool: &SqlitePool, status: Option<OrderStatus>) -> RepoResult<Vec<Order>> {
    let orders = match status {
        Some(status) => {
            sqlx::query_as::<_, Order>(&format!(
                "SELECT {COLUMNS} FROM customer_order WHERE status = ? ORDER BY created_at DESC"
            ))
            .bind(status)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Order>(&format!(
                "SELECT {COLUMNS} FROM customer_order ORDER BY created_at DESC"
            ))
            .fetch_all(pool)
            .await?
        }
    };
    Ok(orders)
}

pub async fn find_items(pool: &SqlitePool, order_id: i64) -> RepoResult<Vec<OrderItem>> {
    let items = sqlx::query_as::<_, OrderItem>(&format!(
        "SELECT {ITEM_COLUMNS} FROM order_item oi \
         LEFT JOIN food_item f ON f.id = oi.food_item_id \
         LEFT JOIN category c ON c.id = f.category_id \
         WHERE oi.order_id = ? ORDER BY oi.id"
    ))
    .bind(order_id)
    .fetch_all(pool)
    .await?;
    Ok(items)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<OrderFull>> {
    let order =
        sqlx::query_as::<_, Order>(&format!("SELECT {COLUMNS} FROM customer_order WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    let Some(order) = order else {
        return Ok(None);
    };
    let items = find_items(pool, order.id).await?;
    Ok(Some(OrderFull { order, items }))
}

/// Receipt lookup by the customer-facing order number
pub async fn find_by_number(pool: &SqlitePool, order_number: &str) -> RepoResult<Option<OrderFull>> {
    let order = sqlx::query_as::<_, Order>(&format!(
        "SELECT {COLUMNS} FROM customer_order WHERE order_number = ?"
    ))
    .bind(order_number)
    .fetch_optional(pool)
    .await?;
    let Some(order) = order else {
        return Ok(None);
    };
    let items = find_items(pool, order.id).await?;
    Ok(Some(OrderFull { order, items }))
}

/// Admin-driven status change, guarded by the transition matrix.
///
/// Illegal moves (backward, skipping, out of a terminal state) are a
/// conflict and leave the row unchanged.
pub async fn update_status(pool: &SqlitePool, id: i64, next: OrderStatus) -> RepoResult<Order> {
    let current: Option<OrderStatus> =
        sqlx::query_scalar("SELECT status FROM customer_order WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    let current = current.ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))?;

    if !current.can_transition_to(next) {
        return Err(RepoError::Conflict(format!(
            "Illegal status transition {current:?} -> {next:?}"
        )));
    }

    sqlx::query("UPDATE customer_order SET status = ?, updated_at = ? WHERE id = ?")
        .bind(next)
        .bind(now_ms())
        .bind(id)
        .execute(pool)
        .await?;

    tracing::info!(order_id = id, from = ?current, to = ?next, "order status updated");
    fetch_one(pool, id).await
}

/// Payment status is an independent axis; any value may be set
pub async fn update_payment_status(
    pool: &SqlitePool,
    id: i64,
    payment_status: PaymentStatus,
) -> RepoResult<Order> {
    let rows = sqlx::query("UPDATE customer_order SET payment_status = ?, updated_at = ? WHERE id = ?")
        .bind(payment_status)
        .bind(now_ms())
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Order {id} not found")));
    }
    fetch_one(pool, id).await
}

async fn fetch_one(pool: &SqlitePool, id: i64) -> RepoResult<Order> {
    sqlx::query_as::<_, Order>(&format!("SELECT {COLUMNS} FROM customer_order WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))
}

/// Aggregate counters for the admin dashboard
pub async fn stats(pool: &SqlitePool) -> RepoResult<OrderStats> {
    let stats = sqlx::query_as::<_, OrderStats>(
        "SELECT COUNT(*) AS total_orders, \
         COALESCE(SUM(CASE WHEN status NOT IN ('DELIVERED', 'CANCELLED') THEN 1 ELSE 0 END), 0) AS active_orders, \
         COALESCE(SUM(CASE WHEN status = 'DELIVERED' THEN 1 ELSE 0 END), 0) AS delivered_orders, \
         COALESCE(SUM(CASE WHEN status = 'CANCELLED' THEN 1 ELSE 0 END), 0) AS cancelled_orders, \
         CAST(COALESCE(SUM(CASE WHEN status != 'CANCELLED' THEN total ELSE 0 END), 0) AS REAL) AS total_revenue \
         FROM customer_order",
    )
    .fetch_one(pool)
    .await?;
    Ok(stats)
}
