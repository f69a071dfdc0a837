//! Cart Repository
//!
//! Session-keyed carts with upsert-on-duplicate-item semantics: at most
//! one cart item per (cart, food item); re-adding sums quantities and
//! refreshes the price snapshot. Mutations run inside a transaction, so
//! two concurrent adds for the same session serialize on the write lock
//! instead of losing an update.

use super::{RepoError, RepoResult};
use crate::pricing;
use crate::utils::now_ms;
use shared::models::{Cart, CartItemDetail, CartSummary};
use sqlx::SqlitePool;

const ITEM_COLUMNS: &str = "ci.id, ci.cart_id, ci.food_item_id, f.name, f.image, \
                            c.name AS category_name, ci.quantity, ci.price";

/// Fetch the cart for a session, creating it lazily on first access
pub async fn get_or_create(pool: &SqlitePool, session_id: &str) -> RepoResult<Cart> {
    if let Some(cart) = find_by_session(pool, session_id).await? {
        return Ok(cart);
    }

    let inserted = sqlx::query_as::<_, Cart>(
        "INSERT INTO cart (session_id, created_at) VALUES (?, ?) \
         RETURNING id, session_id, created_at",
    )
    .bind(session_id)
    .bind(now_ms())
    .fetch_one(pool)
    .await;

    match inserted {
        Ok(cart) => Ok(cart),
        // Two first-accesses can race on the UNIQUE(session_id) insert;
        // the loser picks up the winner's row.
        Err(e) => {
            let err = RepoError::from(e);
            if err.is_unique_violation() {
                find_by_session(pool, session_id)
                    .await?
                    .ok_or_else(|| RepoError::Database("Cart vanished after insert race".into()))
            } else {
                Err(err)
            }
        }
    }
}

pub async fn find_by_session(pool: &SqlitePool, session_id: &str) -> RepoResult<Option<Cart>> {
    let cart = sqlx::query_as::<_, Cart>(
        "SELECT id, session_id, created_at FROM cart WHERE session_id = ?",
    )
    .bind(session_id)
    .fetch_optional(pool)
    .await?;
    Ok(cart)
}

/// Cart items joined with food item and category for display
pub async fn find_items(pool: &SqlitePool, cart_id: i64) -> RepoResult<Vec<CartItemDetail>> {
    let mut items = sqlx::query_as::<_, CartItemDetail>(&format!(
        "SELECT {ITEM_COLUMNS} FROM cart_item ci \
         JOIN food_item f ON f.id = ci.food_item_id \
         JOIN category c ON c.id = f.category_id \
         WHERE ci.cart_id = ? ORDER BY ci.id"
    ))
    .bind(cart_id)
    .fetch_all(pool)
    .await?;

    for item in &mut items {
        item.line_total = pricing::line_total(item.price, item.quantity);
    }
    Ok(items)
}

/// Pure projection of a session's cart: items, item count, subtotal.
///
/// A session without a cart gets an empty summary; creation stays lazy.
pub async fn summary(pool: &SqlitePool, session_id: &str) -> RepoResult<CartSummary> {
    let Some(cart) = find_by_session(pool, session_id).await? else {
        return Ok(CartSummary::empty(session_id));
    };

    let items = find_items(pool, cart.id).await?;
    let item_count = items.iter().map(|i| i.quantity as i64).sum();
    let subtotal = pricing::subtotal(items.iter().map(|i| (i.price, i.quantity)));

    Ok(CartSummary {
        session_id: session_id.to_string(),
        items,
        item_count,
        subtotal,
    })
}

/// Add a food item to the session's cart.
///
/// Fails when the item is missing (`NotFound`) or not orderable
/// (`Unavailable`). An existing line for the same item gains the quantity
/// and is re-priced to the current food item price, so the cart always
/// shows today's pricing up to the moment of checkout.
pub async fn add_item(
    pool: &SqlitePool,
    session_id: &str,
    food_item_id: i64,
    quantity: i32,
) -> RepoResult<CartSummary> {
    let mut tx = pool.begin().await?;

    let cart_id: Option<i64> = sqlx::query_scalar("SELECT id FROM cart WHERE session_id = ?")
        .bind(session_id)
        .fetch_optional(&mut *tx)
        .await?;
    let cart_id = match cart_id {
        Some(id) => id,
        None => {
            sqlx::query_scalar("INSERT INTO cart (session_id, created_at) VALUES (?, ?) RETURNING id")
                .bind(session_id)
                .bind(now_ms())
                .fetch_one(&mut *tx)
                .await?
        }
    };

    let food: Option<(String, f64, bool)> =
        sqlx::query_as("SELECT name, price, is_available FROM food_item WHERE id = ?")
            .bind(food_item_id)
            .fetch_optional(&mut *tx)
            .await?;
    let (name, price, is_available) = food
        .ok_or_else(|| RepoError::NotFound(format!("Food item {food_item_id} not found")))?;
    if !is_available {
        return Err(RepoError::Unavailable(format!(
            "'{name}' is currently unavailable"
        )));
    }

    sqlx::query(
        "INSERT INTO cart_item (cart_id, food_item_id, quantity, price) VALUES (?, ?, ?, ?) \
         ON CONFLICT(cart_id, food_item_id) \
         DO UPDATE SET quantity = quantity + excluded.quantity, price = excluded.price",
    )
    .bind(cart_id)
    .bind(food_item_id)
    .bind(quantity)
    .bind(price)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    summary(pool, session_id).await
}

/// Update a cart line's quantity; `quantity <= 0` removes the line
pub async fn update_item(pool: &SqlitePool, cart_item_id: i64, quantity: i32) -> RepoResult<()> {
    if quantity <= 0 {
        return remove_item(pool, cart_item_id).await;
    }

    let rows = sqlx::query("UPDATE cart_item SET quantity = ? WHERE id = ?")
        .bind(quantity)
        .bind(cart_item_id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Cart item {cart_item_id} not found"
        )));
    }
    Ok(())
}

pub async fn remove_item(pool: &SqlitePool, cart_item_id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM cart_item WHERE id = ?")
        .bind(cart_item_id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Cart item {cart_item_id} not found"
        )));
    }
    Ok(())
}

/// Empty a session's cart. Clearing a session without a cart is a no-op
/// success, not an error.
pub async fn clear(pool: &SqlitePool, session_id: &str) -> RepoResult<()> {
    sqlx::query(
        "DELETE FROM cart_item WHERE cart_id IN (SELECT id FROM cart WHERE session_id = ?)",
    )
    .bind(session_id)
    .execute(pool)
    .await?;
    Ok(())
}
