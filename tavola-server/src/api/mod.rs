//! API route modules
//!
//! One module per resource, each pairing a `router()` with its handlers:
//!
//! - [`health`] - liveness check
//! - [`menu`] - cached public menu
//! - [`categories`] - category management
//! - [`food_items`] - food item management
//! - [`cart`] - session carts and delivery-charge estimates
//! - [`orders`] - checkout and order administration
//! - [`deals`] - promotional deals
//!
//! Admin sub-routers attach the bearer-token middleware via `route_layer`;
//! everything else is public.

pub mod cart;
pub mod categories;
pub mod deals;
pub mod food_items;
pub mod health;
pub mod menu;
pub mod orders;

// Re-export common types for handlers
pub use crate::utils::{AppResult, ok, ok_with_message};
