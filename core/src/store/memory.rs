// scaffold/src/store/memory.rs

//! Process-local store. Backs the test suites and runs the application when no
//! database is configured.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{event, instrument, Level};

use super::ModelStore;
use crate::model::Model;

/// Rows in a `BTreeMap` keyed by primary key.
///
/// Primary keys start at 1 and are never reused, even after deletes. Lock
/// guards are always released before returning, so nothing is held across an
/// `.await` by callers.
pub struct MemoryStore<M: Model> {
  rows: RwLock<BTreeMap<i64, M>>,
  next_pk: AtomicI64,
}

impl<M: Model> MemoryStore<M> {
  pub fn new() -> Self {
    Self {
      rows: RwLock::new(BTreeMap::new()),
      next_pk: AtomicI64::new(1),
    }
  }
}

impl<M: Model> Default for MemoryStore<M> {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl<M: Model> ModelStore<M> for MemoryStore<M> {
  async fn all(&self) -> anyhow::Result<Vec<M>> {
    Ok(self.rows.read().values().cloned().collect())
  }

  async fn get(&self, pk: i64) -> anyhow::Result<Option<M>> {
    Ok(self.rows.read().get(&pk).cloned())
  }

  #[instrument(name = "MemoryStore::insert", skip_all, fields(model = M::VERBOSE_NAME_PLURAL))]
  async fn insert(&self, mut instance: M) -> anyhow::Result<M> {
    let pk = self.next_pk.fetch_add(1, Ordering::SeqCst);
    instance.set_pk(pk);
    self.rows.write().insert(pk, instance.clone());
    event!(Level::DEBUG, pk, "Row inserted.");
    Ok(instance)
  }

  #[instrument(name = "MemoryStore::save", skip_all, fields(model = M::VERBOSE_NAME_PLURAL, pk = instance.pk()))]
  async fn save(&self, instance: M) -> anyhow::Result<Option<M>> {
    let mut rows = self.rows.write();
    match rows.get_mut(&instance.pk()) {
      Some(slot) => {
        *slot = instance.clone();
        Ok(Some(instance))
      }
      None => {
        event!(Level::DEBUG, "Row vanished before save.");
        Ok(None)
      }
    }
  }

  #[instrument(name = "MemoryStore::delete", skip(self), fields(model = M::VERBOSE_NAME_PLURAL))]
  async fn delete(&self, pk: i64) -> anyhow::Result<bool> {
    Ok(self.rows.write().remove(&pk).is_some())
  }

  async fn count(&self) -> anyhow::Result<usize> {
    Ok(self.rows.read().len())
  }
}
