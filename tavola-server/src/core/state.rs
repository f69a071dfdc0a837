//! Server state
//!
//! Shared application state: configuration, database pool, token service
//! and the menu cache. Cloning is cheap (pool and services are handles).

use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::cache::{SystemClock, TtlCache};
use crate::core::Config;
use crate::db::DbService;
use shared::models::Menu;

/// Cached public menu
pub type MenuCache = Arc<TtlCache<Menu>>;

#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// JWT verification service
    pub jwt_service: Arc<JwtService>,
    /// TTL cache for the public menu
    pub menu_cache: MenuCache,
}

impl ServerState {
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        let jwt_service = Arc::new(JwtService::new(config.jwt.clone()));
        let menu_cache = Arc::new(TtlCache::new(
            Duration::from_secs(config.menu_cache_ttl_secs),
            Arc::new(SystemClock),
        ));
        Self {
            config,
            pool,
            jwt_service,
            menu_cache,
        }
    }

    /// Initialize the server state: work directory, then database.
    ///
    /// # Panics
    ///
    /// Panics when the work directory or database cannot be initialized;
    /// the server has nothing to serve without them.
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("tavola.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");

        Self::new(config.clone(), db_service.pool)
    }
}
