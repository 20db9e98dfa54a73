// scaffold/src/lib.rs

//! Scaffold: model / serializer / viewset / router plumbing for CRUD REST
//! resources on actix-web.
//!
//! An application declares:
//!  - a `Model` (a serde struct with an integer primary key),
//!  - a `ModelSerializer` naming the model's `FieldSpec`s,
//!  - a `ModelStore` to persist rows (or uses `MemoryStore`),
//!
//! and registers a `ModelViewSet` on a `DefaultRouter`. The router then serves
//! list / create on `/{prefix}/` and retrieve / update / partial update /
//! destroy on `/{prefix}/{pk}/`, with `OPTIONS` metadata on both and an API
//! root listing every registration.
//!
//! Validation follows the model's field table: required fields, type coercion,
//! length / range / precision limits. Errors render as JSON with conventional
//! status codes (see `ScaffoldError`).

pub mod admin;
pub mod error;
pub mod fields;
pub mod model;
pub mod router;
pub mod serializer;
pub mod store;
pub mod viewset;

// --- Re-exports for the Public API ---

pub use crate::admin::{AdminModel, AdminSite};
pub use crate::error::{ScaffoldError, ScaffoldResult};
pub use crate::fields::{FieldDefault, FieldKind, FieldSpec};
pub use crate::model::Model;
pub use crate::router::{DefaultRouter, Routable};
pub use crate::serializer::{ModelSerializer, ValidatedData, ValidationErrors};
pub use crate::store::{MemoryStore, ModelStore};
pub use crate::viewset::{ActionType, ModelViewSet};
