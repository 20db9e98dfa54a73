// products_app/src/state.rs

use std::sync::Arc;

use scaffold::{MemoryStore, ModelStore};
use tracing::warn;

use crate::config::AppConfig;
use crate::errors::Result as AppResult;
use crate::models::Product;
use crate::store::{postgres, PgProductStore};

/// Which backend the product store runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
  Postgres,
  Memory,
}

impl StoreBackend {
  pub fn as_str(self) -> &'static str {
    match self {
      StoreBackend::Postgres => "postgres",
      StoreBackend::Memory => "memory",
    }
  }
}

#[derive(Clone)]
pub struct AppState {
  pub products: Arc<dyn ModelStore<Product>>,
  pub backend: StoreBackend,
  pub config: Arc<AppConfig>, // Share loaded config
}

impl AppState {
  /// Connects the configured backend: Postgres when `database_url` is set,
  /// otherwise an in-memory store.
  pub async fn from_config(config: Arc<AppConfig>) -> AppResult<Self> {
    match config.database_url.as_deref() {
      Some(database_url) => {
        let pool = postgres::connect(database_url, config.db_max_connections).await?;
        Ok(Self {
          products: Arc::new(PgProductStore::new(pool)),
          backend: StoreBackend::Postgres,
          config,
        })
      }
      None => {
        warn!("DATABASE_URL is not set; products are kept in memory and lost on exit.");
        Ok(Self::in_memory(config))
      }
    }
  }

  pub fn in_memory(config: Arc<AppConfig>) -> Self {
    Self {
      products: Arc::new(MemoryStore::<Product>::new()),
      backend: StoreBackend::Memory,
      config,
    }
  }
}
