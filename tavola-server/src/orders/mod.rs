//! Checkout pipeline
//!
//! Converts a session's cart into an immutable order: subtotal from the
//! cart's snapshot prices, delivery charge from the distance tier table,
//! at most one advisory deal, then a single transaction that writes the
//! order with its line items and empties the cart.


use rand::Rng;
use sqlx::SqlitePool;

use crate::db::repository::order::{NewOrder, NewOrderItem};
use crate::db::repository::{cart, deal, order as order_repo};
use crate::pricing::{self, DeliveryFeeTable};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN,
    validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, now_ms};
use shared::models::{OrderCreate, OrderFull};

/// How many order numbers to try before giving up on the random suffix
const ORDER_NUMBER_ATTEMPTS: u32 = 5;

/// Human-readable order number: the last 8 digits of the millisecond
/// timestamp plus a 3-digit random suffix. Uniqueness is enforced by the
/// DB constraint and a bounded retry in [`place_order`], not by luck.
pub fn generate_order_number(now_ms: i64) -> String {
    let suffix: u16 = rand::thread_rng().gen_range(0..1000);
    format!("ORD-{:08}{suffix:03}", now_ms % 100_000_000)
}

fn validate_request(req: &OrderCreate) -> Result<(), AppError> {
    validate_required_text(&req.session_id, "sessionId", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&req.customer_name, "customerName", MAX_NAME_LEN)?;
    validate_required_text(&req.customer_phone, "customerPhone", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&req.delivery_address, "deliveryAddress", MAX_ADDRESS_LEN)?;
    validate_optional_text(&req.customer_email, "customerEmail", MAX_EMAIL_LEN)?;
    validate_optional_text(&req.notes, "notes", MAX_NOTE_LEN)?;
    Ok(())
}

/// Create an order from the session's cart.
///
/// The checkout total always matches what the customer saw in the cart:
/// line prices come from the cart's snapshots, never from the live food
/// items. All writes land in one transaction; on any failure the cart is
/// left untouched and no order exists.
pub async fn place_order(
    pool: &SqlitePool,
    fees: &DeliveryFeeTable,
    req: OrderCreate,
) -> Result<OrderFull, AppError> {
    validate_request(&req)?;

    // 1. The cart must exist and hold at least one item
    let cart_row = cart::find_by_session(pool, &req.session_id)
        .await?
        .ok_or(AppError::EmptyCart)?;
    let items = cart::find_items(pool, cart_row.id).await?;
    if items.is_empty() {
        return Err(AppError::EmptyCart);
    }

    // 2. Subtotal from the stored snapshot prices
    let subtotal = pricing::subtotal(items.iter().map(|i| (i.price, i.quantity)));

    // 3. Delivery charge from the tier table; no distance = in-range pickup
    let delivery_charges = match req.distance {
        Some(distance) => fees.charge(distance)?,
        None => 0.0,
    };

    // 4. At most one deal, advisory: any failed eligibility check yields
    //    a zero discount, never an error
    let now = now_ms();
    let mut applied_deal_id = None;
    let discount = match req.deal_id {
        Some(deal_id) => match deal::find_by_id(pool, deal_id).await? {
            Some(d) => {
                let value = pricing::calculate_discount(&d, subtotal, now);
                if value > 0.0 {
                    applied_deal_id = Some(d.id);
                } else {
                    tracing::debug!(deal_id, subtotal, "deal not eligible, no discount applied");
                }
                value
            }
            None => {
                tracing::debug!(deal_id, "deal not found, no discount applied");
                0.0
            }
        },
        None => 0.0,
    };

    // 5. Totals, with the discount clamped so the total stays >= 0
    let (discount, total) = pricing::order_totals(subtotal, delivery_charges, discount);

    let new_items: Vec<NewOrderItem> = items
        .iter()
        .map(|i| NewOrderItem {
            food_item_id: i.food_item_id,
            name: i.name.clone(),
            quantity: i.quantity,
            price: i.price,
            total: i.line_total,
        })
        .collect();

    let mut new_order = NewOrder {
        order_number: String::new(),
        customer_name: req.customer_name,
        customer_phone: req.customer_phone,
        customer_email: req.customer_email,
        delivery_address: req.delivery_address,
        latitude: req.latitude,
        longitude: req.longitude,
        distance: req.distance,
        subtotal,
        delivery_charges,
        discount,
        total,
        payment_method: req.payment_method,
        notes: req.notes,
        deal_id: applied_deal_id,
    };

    // 6./7. Persist atomically, regenerating the order number on the rare
    // unique-constraint collision
    for attempt in 0..ORDER_NUMBER_ATTEMPTS {
        new_order.order_number = generate_order_number(now_ms());
        match order_repo::persist(pool, &new_order, &new_items, cart_row.id).await {
            Ok(order_id) => {
                tracing::info!(
                    order_id,
                    order_number = %new_order.order_number,
                    total,
                    "order created"
                );
                // 8. Receipt view
                return order_repo::find_by_id(pool, order_id)
                    .await?
                    .ok_or_else(|| AppError::internal("Order vanished after creation"));
            }
            Err(e) if e.is_unique_violation() => {
                tracing::warn!(
                    attempt,
                    order_number = %new_order.order_number,
                    "order number collision, regenerating"
                );
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(AppError::internal(
        "Could not allocate a unique order number",
    ))
}
