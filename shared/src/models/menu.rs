//! Menu Model
//!
//! The combined customer-facing menu read: active categories plus
//! available food items, served through the server's TTL cache.

use serde::{Deserialize, Serialize};

use super::{Category, FoodItemDetail};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    pub categories: Vec<Category>,
    pub food_items: Vec<FoodItemDetail>,
}
