// tests/common/mod.rs
#![allow(dead_code)] // Not every suite uses every helper.

use std::sync::Arc;

use actix_web::web;
use rust_decimal::Decimal;
use scaffold::{AdminSite, DefaultRouter, FieldSpec, MemoryStore, Model, ModelSerializer, ModelViewSet};
use serde::{Deserialize, Serialize};
use tracing::Level;

// --- Test model ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gadget {
  pub id: i64,
  pub label: String,
  pub price: Decimal,
  pub in_stock: bool,
  pub notes: String,
}

impl Model for Gadget {
  const VERBOSE_NAME_PLURAL: &'static str = "Gadgets";

  fn pk(&self) -> i64 {
    self.id
  }

  fn set_pk(&mut self, pk: i64) {
    self.id = pk;
  }
}

pub struct GadgetSerializer;

static GADGET_FIELDS: &[FieldSpec] = &[
  FieldSpec::integer("id").read_only().label("ID"),
  FieldSpec::char("label", 40),
  FieldSpec::decimal("price", 6, 2),
  FieldSpec::boolean("in_stock").default_bool(true),
  FieldSpec::text("notes").allow_blank().default_str(""),
];

impl ModelSerializer for GadgetSerializer {
  type Model = Gadget;

  fn fields() -> &'static [FieldSpec] {
    GADGET_FIELDS
  }
}

pub type GadgetViewSet = ModelViewSet<GadgetSerializer>;

pub fn gadget_viewset(store: Arc<MemoryStore<Gadget>>) -> Arc<GadgetViewSet> {
  Arc::new(ModelViewSet::<GadgetSerializer>::new("gadgets", store).with_name("Gadget"))
}

/// `/api/` router with gadgets registered, plus `/admin/`.
pub fn configure(store: Arc<MemoryStore<Gadget>>) -> impl FnOnce(&mut web::ServiceConfig) {
  move |cfg: &mut web::ServiceConfig| {
    let viewset = gadget_viewset(store);

    let mut router = DefaultRouter::new();
    router.register("gadgets", Arc::clone(&viewset));

    let mut admin = AdminSite::new("Gadget administration");
    admin.register(viewset);

    cfg
      .service(web::scope("/api").configure(|cfg| router.configure(cfg)))
      .service(web::scope("/admin").configure(|cfg| admin.configure(cfg)));
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
