// scaffold/src/model.rs

//! The `Model` trait: what the scaffolding needs to know about a persisted row.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A persisted entity with an integer primary key.
///
/// The serde derive of the implementing struct is the single source of truth
/// for the wire shape: fields render in declaration order, and validated
/// payloads are mapped back onto the struct through `Deserialize`.
pub trait Model: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
  /// Plural display name, e.g. `"Products"`.
  const VERBOSE_NAME_PLURAL: &'static str;

  /// Name of the primary key field in the serialized form.
  const PK_FIELD: &'static str = "id";

  fn pk(&self) -> i64;

  fn set_pk(&mut self, pk: i64);
}
