// products_app/src/errors.rs

use thiserror::Error;

/// Start-up failures. Request-path errors are `scaffold::ScaffoldError`.
#[derive(Debug, Error)]
pub enum AppError {
  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Database Migration Error: {0}")]
  Migrate(#[from] sqlx::migrate::MigrateError),

  #[error("I/O Error: {0}")]
  Io(#[from] std::io::Error),
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
