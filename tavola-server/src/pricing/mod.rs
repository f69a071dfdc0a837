//! Money and pricing calculations
//!
//! All monetary arithmetic is done in `rust_decimal::Decimal` and rounded
//! to 2 decimal places half-up before being converted back to `f64` for
//! storage/serialization. Covers the tiered delivery fee table, deal
//! discount calculation and order totals.

use rust_decimal::prelude::*;
use shared::models::{DiscountType, SpecialDeal};

use crate::utils::AppError;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum delivery distance accepted at checkout (km)
pub const MAX_DISTANCE_KM: f64 = 1_000.0;

/// Round a decimal to money precision
fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert an `f64` amount into a `Decimal` for calculation
fn dec(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Line total: snapshot price × quantity
pub fn line_total(price: f64, quantity: i32) -> f64 {
    round_money(dec(price) * Decimal::from(quantity))
        .to_f64()
        .unwrap_or(0.0)
}

/// Cart subtotal: Σ price × quantity over (price, quantity) pairs
pub fn subtotal(items: impl IntoIterator<Item = (f64, i32)>) -> f64 {
    let sum = items
        .into_iter()
        .map(|(price, qty)| dec(price) * Decimal::from(qty))
        .sum::<Decimal>();
    round_money(sum).to_f64().unwrap_or(0.0)
}

// ============================================================================
// Delivery fees
// ============================================================================

/// One step of the delivery fee function: distances up to `up_to_km`
/// (inclusive) pay `fee`.
#[derive(Debug, Clone, Copy)]
pub struct DeliveryTier {
    pub up_to_km: f64,
    pub fee: f64,
}

/// Tiered delivery fee table: a step function from distance to a flat fee.
///
/// Tiers are ordered by distance; anything beyond the last tier pays
/// `beyond_fee`.
#[derive(Debug, Clone)]
pub struct DeliveryFeeTable {
    pub tiers: Vec<DeliveryTier>,
    pub beyond_fee: f64,
}

impl Default for DeliveryFeeTable {
    fn default() -> Self {
        Self {
            tiers: vec![
                DeliveryTier {
                    up_to_km: 4.0,
                    fee: 0.0,
                },
                DeliveryTier {
                    up_to_km: 6.0,
                    fee: 50.0,
                },
            ],
            beyond_fee: 120.0,
        }
    }
}

impl DeliveryFeeTable {
    /// Delivery charge for a distance in km.
    ///
    /// Tier bounds are inclusive: exactly 4 km rides the free tier,
    /// exactly 6 km the middle one.
    pub fn charge(&self, distance_km: f64) -> Result<f64, AppError> {
        if !distance_km.is_finite() || distance_km < 0.0 {
            return Err(AppError::validation(format!(
                "distance must be a non-negative number, got {distance_km}"
            )));
        }
        if distance_km > MAX_DISTANCE_KM {
            return Err(AppError::validation(format!(
                "distance exceeds maximum deliverable range ({MAX_DISTANCE_KM} km)"
            )));
        }
        for tier in &self.tiers {
            if distance_km <= tier.up_to_km {
                return Ok(tier.fee);
            }
        }
        Ok(self.beyond_fee)
    }
}

// ============================================================================
// Discounts and totals
// ============================================================================

/// Discount a deal yields on `amount` at time `now_ms`.
///
/// Pure function shared by the order pipeline and preview endpoints. Any
/// failed eligibility check yields 0: the deal is advisory, never an
/// error.
pub fn calculate_discount(deal: &SpecialDeal, amount: f64, now_ms: i64) -> f64 {
    if !deal.is_eligible(now_ms, amount) {
        return 0.0;
    }
    let discount = match deal.discount_type {
        DiscountType::Percentage => dec(amount) * dec(deal.discount) / Decimal::from(100),
        DiscountType::Fixed => dec(deal.discount),
    };
    round_money(discount).to_f64().unwrap_or(0.0)
}

/// Final order amounts: (clamped discount, total).
///
/// The discount is clamped so the total never goes negative; the clamped
/// value is what gets persisted on the order.
pub fn order_totals(subtotal: f64, delivery_charges: f64, discount: f64) -> (f64, f64) {
    let gross = dec(subtotal) + dec(delivery_charges);
    let discount = dec(discount).min(gross);
    let total = round_money(gross - discount);
    (
        round_money(discount).to_f64().unwrap_or(0.0),
        total.to_f64().unwrap_or(0.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::DiscountType;

    fn deal(discount: f64, discount_type: DiscountType, min: Option<f64>) -> SpecialDeal {
        SpecialDeal {
            id: 1,
            title: "Promo".into(),
            description: "Promo".into(),
            image: None,
            discount,
            discount_type,
            min_order_amount: min,
            valid_from: 0,
            valid_to: i64::MAX,
            is_active: true,
            created_at: 0,
        }
    }

    #[test]
    fn delivery_tier_boundaries() {
        let table = DeliveryFeeTable::default();
        assert_eq!(table.charge(0.0).unwrap(), 0.0);
        assert_eq!(table.charge(4.0).unwrap(), 0.0);
        assert_eq!(table.charge(4.01).unwrap(), 50.0);
        assert_eq!(table.charge(6.0).unwrap(), 50.0);
        assert_eq!(table.charge(6.01).unwrap(), 120.0);
        assert_eq!(table.charge(25.0).unwrap(), 120.0);
    }

    #[test]
    fn delivery_rejects_bad_distances() {
        let table = DeliveryFeeTable::default();
        assert!(table.charge(-1.0).is_err());
        assert!(table.charge(f64::NAN).is_err());
        assert!(table.charge(f64::INFINITY).is_err());
        assert!(table.charge(MAX_DISTANCE_KM + 1.0).is_err());
    }

    #[test]
    fn percentage_discount_on_eligible_amount() {
        let d = deal(10.0, DiscountType::Percentage, Some(500.0));
        assert_eq!(calculate_discount(&d, 600.0, 1), 60.0);
    }

    #[test]
    fn min_amount_gate_soft_fails_to_zero() {
        let d = deal(10.0, DiscountType::Percentage, Some(500.0));
        assert_eq!(calculate_discount(&d, 300.0, 1), 0.0);
    }

    #[test]
    fn expired_or_inactive_deal_yields_zero() {
        let mut d = deal(25.0, DiscountType::Fixed, None);
        d.valid_to = 10;
        assert_eq!(calculate_discount(&d, 100.0, 20), 0.0);

        let mut d = deal(25.0, DiscountType::Fixed, None);
        d.is_active = false;
        assert_eq!(calculate_discount(&d, 100.0, 1), 0.0);
    }

    #[test]
    fn fixed_discount_is_flat() {
        let d = deal(25.0, DiscountType::Fixed, None);
        assert_eq!(calculate_discount(&d, 100.0, 1), 25.0);
    }

    #[test]
    fn totals_clamp_discount_to_gross() {
        let (discount, total) = order_totals(30.0, 10.0, 100.0);
        assert_eq!(discount, 40.0);
        assert_eq!(total, 0.0);
    }

    #[test]
    fn totals_add_up() {
        let (discount, total) = order_totals(550.0, 50.0, 0.0);
        assert_eq!(discount, 0.0);
        assert_eq!(total, 600.0);
    }

    #[test]
    fn subtotal_avoids_float_drift() {
        // 0.1 * 3 is 0.30000000000000004 in plain f64
        assert_eq!(subtotal([(0.1, 3)]), 0.3);
        assert_eq!(subtotal([(200.0, 2), (150.0, 1)]), 550.0);
    }

    #[test]
    fn percentage_rounds_half_up() {
        let d = deal(15.0, DiscountType::Percentage, None);
        // 33.33 * 15% = 4.9995 -> 5.00
        assert_eq!(calculate_discount(&d, 33.33, 1), 5.0);
    }
}
