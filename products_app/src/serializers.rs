// products_app/src/serializers.rs

use scaffold::{FieldSpec, ModelSerializer};

use crate::models::Product;

/// Exposes every `Product` field; all behavior is the scaffold default.
pub struct ProductSerializer;

impl ModelSerializer for ProductSerializer {
  type Model = Product;

  fn fields() -> &'static [FieldSpec] {
    Product::FIELDS
  }
}
