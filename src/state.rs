use std::sync::Arc;

use tracing::{info, warn};

use crate::config::AppConfig;
use crate::database::{DatabaseError, DatabaseManager, ItemStore, MemoryStore, PgRepository, UserStore};

/// Shared handler state: immutable configuration plus the stores
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub items: Arc<dyn ItemStore>,
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    /// Connect to PostgreSQL when a database URL is configured, otherwise
    /// fall back to the in-memory store.
    pub async fn new(config: AppConfig) -> Result<Self, DatabaseError> {
        if config.database.url.is_none() {
            warn!("DATABASE_URL not set, items are kept in memory and lost on restart");
            return Ok(Self::in_memory(config));
        }

        let pool = DatabaseManager::connect(&config.database).await?;
        DatabaseManager::migrate(&pool).await?;
        let repository = Arc::new(PgRepository::new(pool));

        Ok(Self {
            config: Arc::new(config),
            items: repository.clone(),
            users: repository,
        })
    }

    pub fn in_memory(config: AppConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        info!("Using in-memory store");
        Self {
            config: Arc::new(config),
            items: store.clone(),
            users: store,
        }
    }
}
