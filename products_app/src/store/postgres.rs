// products_app/src/store/postgres.rs

use anyhow::Context;
use async_trait::async_trait;
use scaffold::ModelStore;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{error, info, instrument};

use crate::errors::{AppError, Result as AppResult};
use crate::models::Product;

const PRODUCT_COLUMNS: &str = "id, name, description, price, stock";

/// Opens the pool and applies pending migrations.
pub async fn connect(database_url: &str, max_connections: u32) -> AppResult<PgPool> {
  let pool = PgPoolOptions::new()
    .max_connections(max_connections)
    .connect(database_url)
    .await
    .map_err(|e| {
      error!("Failed to connect to the database: {}", e);
      AppError::Sqlx(e)
    })?;
  info!("Successfully connected to the database.");

  sqlx::migrate!("./migrations").run(&pool).await?;
  info!("Database migrations applied.");
  Ok(pool)
}

/// `ModelStore<Product>` over the `products` table, using runtime queries.
#[derive(Clone)]
pub struct PgProductStore {
  pool: PgPool,
}

impl PgProductStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl ModelStore<Product> for PgProductStore {
  #[instrument(name = "PgProductStore::all", skip(self))]
  async fn all(&self) -> anyhow::Result<Vec<Product>> {
    sqlx::query_as(&format!("SELECT {} FROM products ORDER BY id ASC", PRODUCT_COLUMNS))
      .fetch_all(&self.pool)
      .await
      .context("Failed to fetch products")
  }

  #[instrument(name = "PgProductStore::get", skip(self))]
  async fn get(&self, pk: i64) -> anyhow::Result<Option<Product>> {
    sqlx::query_as(&format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS))
      .bind(pk)
      .fetch_optional(&self.pool)
      .await
      .with_context(|| format!("Failed to fetch product {}", pk))
  }

  #[instrument(name = "PgProductStore::insert", skip_all)]
  async fn insert(&self, instance: Product) -> anyhow::Result<Product> {
    sqlx::query_as(&format!(
      "INSERT INTO products (name, description, price, stock) VALUES ($1, $2, $3, $4) RETURNING {}",
      PRODUCT_COLUMNS
    ))
    .bind(&instance.name)
    .bind(&instance.description)
    .bind(instance.price)
    .bind(instance.stock)
    .fetch_one(&self.pool)
    .await
    .context("Failed to insert product")
  }

  #[instrument(name = "PgProductStore::save", skip_all, fields(pk = instance.id))]
  async fn save(&self, instance: Product) -> anyhow::Result<Option<Product>> {
    sqlx::query_as(&format!(
      "UPDATE products SET name = $2, description = $3, price = $4, stock = $5 WHERE id = $1 RETURNING {}",
      PRODUCT_COLUMNS
    ))
    .bind(instance.id)
    .bind(&instance.name)
    .bind(&instance.description)
    .bind(instance.price)
    .bind(instance.stock)
    .fetch_optional(&self.pool)
    .await
    .with_context(|| format!("Failed to update product {}", instance.id))
  }

  #[instrument(name = "PgProductStore::delete", skip(self))]
  async fn delete(&self, pk: i64) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
      .bind(pk)
      .execute(&self.pool)
      .await
      .with_context(|| format!("Failed to delete product {}", pk))?;
    Ok(result.rows_affected() > 0)
  }

  async fn count(&self) -> anyhow::Result<usize> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
      .fetch_one(&self.pool)
      .await
      .context("Failed to count products")?;
    Ok(count as usize)
  }
}
