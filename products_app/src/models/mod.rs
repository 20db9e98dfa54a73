// products_app/src/models/mod.rs

//! Contains data structures representing database entities.

pub mod product;

pub use product::Product;
