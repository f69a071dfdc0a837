//! Order Models
//!
//! Orders are immutable price snapshots of a cart at checkout time; only
//! `status` and `payment_status` change afterwards, and status changes
//! follow the forward-only delivery chain (CANCELLED is reachable from any
//! non-terminal state).

use serde::{Deserialize, Serialize};

/// Order lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Terminal states accept no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Position in the forward delivery chain
    fn rank(&self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Confirmed => 1,
            Self::Preparing => 2,
            Self::Ready => 3,
            Self::OutForDelivery => 4,
            Self::Delivered => 5,
            Self::Cancelled => 6,
        }
    }

    /// Whether moving from `self` to `next` is a legal transition.
    ///
    /// Legal moves are one step forward along the chain, or CANCELLED from
    /// any non-terminal state. Backward and skipping moves are rejected.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        if self.is_terminal() || *self == next {
            return false;
        }
        if next == Self::Cancelled {
            return true;
        }
        next.rank() == self.rank() + 1
    }
}

/// Payment state, an axis independent of order status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
}

/// Payment method chosen at checkout
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum PaymentMethod {
    Cash,
    Card,
    Online,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    /// Human-readable unique order number, generated at creation
    pub order_number: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub delivery_address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Delivery distance in km, as estimated at checkout
    pub distance: Option<f64>,
    /// Sum of item snapshot prices × quantities
    pub subtotal: f64,
    pub delivery_charges: f64,
    pub discount: f64,
    /// subtotal + delivery_charges − discount (never negative)
    pub total: f64,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub notes: Option<String>,
    /// The deal that produced `discount`, when one applied
    pub deal_id: Option<i64>,
    /// Creation time (unix millis)
    pub created_at: i64,
    /// Last status/payment update (unix millis)
    pub updated_at: i64,
}

/// Order line item, a frozen copy of a cart item.
///
/// `name`, `price` and `total` are snapshots taken at checkout; `image`
/// and `category_name` are joined from the live catalog for receipt
/// rendering and go absent when the food item is later deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    /// Informational reference; the snapshot fields are authoritative
    pub food_item_id: i64,
    /// Food item name at checkout time
    pub name: String,
    pub quantity: i32,
    /// Snapshot price carried over from the cart
    pub price: f64,
    /// price × quantity, computed once at checkout
    pub total: f64,
    /// Current food item image, if the item still exists
    pub image: Option<String>,
    /// Current category name, if the item still exists
    pub category_name: Option<String>,
}

/// Order with its line items, for receipts and admin detail views
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFull {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Checkout request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub session_id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub delivery_address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Delivery distance in km; absent means pickup-range (zero charge tier)
    pub distance: Option<f64>,
    /// Optional deal to apply; ineligibility yields discount 0, not an error
    pub deal_id: Option<i64>,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
}

/// Status update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

/// Payment status update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatusUpdate {
    pub payment_status: PaymentStatus,
}

/// Aggregate order statistics for the admin dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderStats {
    pub total_orders: i64,
    /// Orders not yet delivered or cancelled
    pub active_orders: i64,
    pub delivered_orders: i64,
    pub cancelled_orders: i64,
    /// Sum of totals over non-cancelled orders
    pub total_revenue: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_steps_are_legal() {
        use OrderStatus::*;
        for (from, to) in [
            (Pending, Confirmed),
            (Confirmed, Preparing),
            (Preparing, Ready),
            (Ready, OutForDelivery),
            (OutForDelivery, Delivered),
        ] {
            assert!(from.can_transition_to(to), "{from:?} -> {to:?}");
        }
    }

    #[test]
    fn backward_and_skipping_moves_are_rejected() {
        use OrderStatus::*;
        assert!(!Delivered.can_transition_to(Pending));
        assert!(!Preparing.can_transition_to(Confirmed));
        assert!(!Pending.can_transition_to(Preparing));
        assert!(!Confirmed.can_transition_to(Confirmed));
    }

    #[test]
    fn cancel_reachable_from_non_terminal_only() {
        use OrderStatus::*;
        assert!(Pending.can_transition_to(Cancelled));
        assert!(OutForDelivery.can_transition_to(Cancelled));
        assert!(!Delivered.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Pending));
    }

    #[test]
    fn status_serializes_screaming_snake() {
        let json = serde_json::to_string(&OrderStatus::OutForDelivery).unwrap();
        assert_eq!(json, r#""OUT_FOR_DELIVERY""#);
    }
}
