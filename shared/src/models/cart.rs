//! Cart Models
//!
//! Carts are keyed by an opaque client-generated session token, created
//! lazily on first mutating access and cleared on checkout. A cart item
//! carries a price snapshot taken when the item was added or last updated.

use serde::{Deserialize, Serialize};

/// Cart entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Cart {
    pub id: i64,
    pub session_id: String,
    /// Creation time (unix millis)
    pub created_at: i64,
}

/// Cart item joined with food item and category info for display.
///
/// At most one row exists per (cart, food item); re-adding increments
/// quantity and refreshes the price snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CartItemDetail {
    pub id: i64,
    pub cart_id: i64,
    pub food_item_id: i64,
    pub name: String,
    pub image: Option<String>,
    pub category_name: String,
    pub quantity: i32,
    /// Snapshot of the food item price at add/update time
    pub price: f64,
    /// price × quantity; filled in by the server after the row is fetched
    #[cfg_attr(feature = "db", sqlx(default))]
    pub line_total: f64,
}

/// Projection of a cart: items, total quantity and subtotal
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub session_id: String,
    pub items: Vec<CartItemDetail>,
    /// Sum of item quantities
    pub item_count: i64,
    /// Sum of price × quantity over all items
    pub subtotal: f64,
}

impl CartSummary {
    /// Empty summary for a session without a cart
    pub fn empty(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            items: Vec::new(),
            item_count: 0,
            subtotal: 0.0,
        }
    }
}

/// Add-to-cart payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemAdd {
    pub session_id: String,
    pub food_item_id: i64,
    pub quantity: i32,
}

/// Update-quantity payload; `quantity <= 0` removes the item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemQuantity {
    pub quantity: i32,
}

/// Clear-cart payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartClear {
    pub session_id: String,
}
