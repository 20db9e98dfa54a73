// products_app/src/store/mod.rs

//! Persistence backends for `Product`. Postgres when `DATABASE_URL` is set,
//! otherwise the scaffold's in-memory store.

pub mod postgres;

pub use postgres::PgProductStore;
