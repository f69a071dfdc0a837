//! Repository Module
//!
//! One module per table, with free async functions over `&SqlitePool`.
//! Business rules that belong to the data (duplicate names, delete guards,
//! upsert identity) are enforced here, next to the queries.

// Catalog
pub mod category;
pub mod food_item;

// Cart
pub mod cart;

// Deals
pub mod deal;

// Orders
pub mod order;

#[cfg(test)]
mod tests;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Duplicate(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unavailable(String),

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl RepoError {
    /// Whether the underlying failure was a UNIQUE constraint violation
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, RepoError::Database(msg) if msg.contains("UNIQUE constraint failed"))
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

#[cfg(test)]
pub(crate) mod test_support {
    use sqlx::SqlitePool;
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use std::str::FromStr;

    /// In-memory SQLite pool with the real migrations applied.
    ///
    /// A single connection keeps the `:memory:` database alive and shared
    /// across the test.
    pub async fn test_pool() -> SqlitePool {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .expect("memory connect options")
            .pragma("foreign_keys", "ON");
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .expect("open in-memory database");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("apply migrations");
        pool
    }
}
