// products_app/src/models/product.rs

use rust_decimal::Decimal;
use scaffold::{FieldSpec, Model};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One row of the `products` table. Field order here is the order fields
/// render in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
  pub id: i64,
  pub name: String,
  pub description: String, // Blank rather than NULL when absent
  pub price: Decimal,
  pub stock: i32,
}

impl Product {
  /// Column declarations, mirrored by `migrations/*_create_products.sql`.
  pub const FIELDS: &'static [FieldSpec] = &[
    FieldSpec::integer("id").read_only().label("ID"),
    FieldSpec::char("name", 255),
    FieldSpec::text("description").allow_blank().default_str(""),
    FieldSpec::decimal("price", 10, 2),
    FieldSpec::integer("stock").min(0).max(i32::MAX as i64).default_int(0),
  ];
}

impl Model for Product {
  const VERBOSE_NAME_PLURAL: &'static str = "Products";

  fn pk(&self) -> i64 {
    self.id
  }

  fn set_pk(&mut self, pk: i64) {
    self.id = pk;
  }
}
