// scaffold/src/store/mod.rs

//! The persistence seam. A viewset reads and writes through a `ModelStore`,
//! the equivalent of a model's default "all rows" queryset: no filtering, no
//! ownership rules, writes land immediately.

pub mod memory;

use async_trait::async_trait;

use crate::model::Model;

pub use memory::MemoryStore;

#[async_trait]
pub trait ModelStore<M: Model>: Send + Sync {
  /// Every row, ordered by primary key.
  async fn all(&self) -> anyhow::Result<Vec<M>>;

  async fn get(&self, pk: i64) -> anyhow::Result<Option<M>>;

  /// Persists a new row and returns it with its assigned primary key. The
  /// incoming primary key is ignored.
  async fn insert(&self, instance: M) -> anyhow::Result<M>;

  /// Overwrites the row with `instance.pk()`. `None` when no such row exists.
  async fn save(&self, instance: M) -> anyhow::Result<Option<M>>;

  /// Returns whether a row was removed.
  async fn delete(&self, pk: i64) -> anyhow::Result<bool>;

  async fn count(&self) -> anyhow::Result<usize> {
    Ok(self.all().await?.len())
  }
}
