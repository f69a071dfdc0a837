//! Food Item Model

use serde::{Deserialize, Serialize};

/// Food item with its category name joined (menu/admin display)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct FoodItemDetail {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Current menu price. Carts and orders snapshot this value; later
    /// price edits never rewrite history.
    pub price: f64,
    pub image: Option<String>,
    pub category_id: i64,
    pub category_name: String,
    pub is_available: bool,
    /// Creation time (unix millis)
    pub created_at: i64,
}

/// Create food item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItemCreate {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub image: Option<String>,
    pub category_id: i64,
}

/// Update food item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
    pub category_id: Option<i64>,
    pub is_available: Option<bool>,
}
