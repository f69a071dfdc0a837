//! Special Deal Model
//!
//! Time-windowed promotional discounts, optionally gated on a minimum
//! order amount. At most one deal applies per order; an ineligible deal
//! soft-fails to a zero discount instead of raising.

use serde::{Deserialize, Serialize};

/// Discount type enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum DiscountType {
    /// `discount` is a percentage of the order subtotal (0–100)
    Percentage,
    /// `discount` is a flat amount
    Fixed,
}

/// Special deal entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SpecialDeal {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    /// Discount value (percentage: 10 = 10%, fixed: 50 = 50 flat)
    pub discount: f64,
    pub discount_type: DiscountType,
    /// Minimum order subtotal required; unset = no gate
    pub min_order_amount: Option<f64>,
    /// Validity window start (unix millis)
    pub valid_from: i64,
    /// Validity window end (unix millis), exclusive of nothing: `valid_from < valid_to`
    pub valid_to: i64,
    pub is_active: bool,
    /// Creation time (unix millis)
    pub created_at: i64,
}

impl SpecialDeal {
    /// Whether `now` falls within the validity window
    pub fn is_within_window(&self, now_ms: i64) -> bool {
        self.valid_from <= now_ms && now_ms <= self.valid_to
    }

    /// Full eligibility check: active, within window, amount gate satisfied
    pub fn is_eligible(&self, now_ms: i64, amount: f64) -> bool {
        self.is_active
            && self.is_within_window(now_ms)
            && self.min_order_amount.is_none_or(|min| amount >= min)
    }
}

/// Create special deal payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialDealCreate {
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub discount: f64,
    pub discount_type: DiscountType,
    pub min_order_amount: Option<f64>,
    pub valid_from: i64,
    pub valid_to: i64,
}

/// Update special deal payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialDealUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub discount: Option<f64>,
    pub discount_type: Option<DiscountType>,
    pub min_order_amount: Option<f64>,
    pub valid_from: Option<i64>,
    pub valid_to: Option<i64>,
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deal(active: bool, min: Option<f64>) -> SpecialDeal {
        SpecialDeal {
            id: 1,
            title: "Lunch promo".into(),
            description: "10% off".into(),
            image: None,
            discount: 10.0,
            discount_type: DiscountType::Percentage,
            min_order_amount: min,
            valid_from: 1_000,
            valid_to: 2_000,
            is_active: active,
            created_at: 0,
        }
    }

    #[test]
    fn window_is_inclusive_at_both_ends() {
        let d = deal(true, None);
        assert!(d.is_within_window(1_000));
        assert!(d.is_within_window(2_000));
        assert!(!d.is_within_window(999));
        assert!(!d.is_within_window(2_001));
    }

    #[test]
    fn eligibility_gates_on_active_window_and_amount() {
        assert!(deal(true, None).is_eligible(1_500, 1.0));
        assert!(!deal(false, None).is_eligible(1_500, 1.0));
        assert!(!deal(true, None).is_eligible(3_000, 1.0));
        assert!(!deal(true, Some(500.0)).is_eligible(1_500, 300.0));
        assert!(deal(true, Some(500.0)).is_eligible(1_500, 500.0));
    }

    #[test]
    fn discount_type_serializes_screaming_snake() {
        let json = serde_json::to_string(&DiscountType::Percentage).unwrap();
        assert_eq!(json, r#""PERCENTAGE""#);
    }
}
