//! Tavola Server - restaurant ordering platform backend
//!
//! # Architecture
//!
//! - **HTTP API** (`api`): axum routers, one module per resource
//! - **Database** (`db`): SQLite storage via sqlx, repository per table
//! - **Checkout** (`orders`): the cart-to-order transaction pipeline
//! - **Pricing** (`pricing`): decimal money math, delivery tiers, discounts
//! - **Cache** (`cache`): TTL + single-flight cache for the public menu
//! - **Auth** (`auth`): bearer JWT verification for admin routes
//!
//! # Module layout
//!
//! ```text
//! tavola-server/src/
//! ├── core/          # config, state, server lifecycle
//! ├── auth/          # JWT validation, admin middleware
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # pool, migrations, repositories
//! ├── orders/        # checkout pipeline
//! ├── pricing/       # money, delivery fees, discounts
//! ├── cache/         # TTL cache
//! └── utils/         # errors, logging, validation
//! ```

pub mod api;
pub mod auth;
pub mod cache;
pub mod core;
pub mod db;
pub mod orders;
pub mod pricing;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load .env and initialize logging. Called once at startup.
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

/// Startup banner
pub fn print_banner() {
    println!(
        "🍕 Tavola restaurant ordering platform v{}",
        env!("CARGO_PKG_VERSION")
    );
}
