//! Data models
//!
//! Shared between tavola-server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY), timestamps are unix
//! milliseconds, JSON field names are camelCase.

pub mod cart;
pub mod category;
pub mod deal;
pub mod food_item;
pub mod menu;
pub mod order;

// Re-exports
pub use cart::*;
pub use category::*;
pub use deal::*;
pub use food_item::*;
pub use menu::*;
pub use order::*;
