//! Shared types for the tavola platform
//!
//! Data models, request/response DTOs and the uniform API envelope used by
//! the server and its clients. DB row types derive `sqlx::FromRow` behind
//! the `db` feature so non-server consumers stay dependency-light.

pub mod models;
pub mod request;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use request::ListQuery;
pub use response::ApiResponse;
