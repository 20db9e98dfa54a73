// products_app/src/main.rs

use std::sync::Arc;

use actix_web::HttpServer;
use products_app::config::AppConfig;
use products_app::state::AppState;
use products_app::{build_app, telemetry};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Load application configuration before logging so LOG_FORMAT can apply.
  let loaded = AppConfig::from_env();
  telemetry::init(loaded.as_ref().map(|cfg| cfg.log_format).unwrap_or_default());

  let app_config = match loaded {
    Ok(cfg) => Arc::new(cfg), // Arc the config for sharing
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      return Err(std::io::Error::other(e));
    }
  };

  tracing::info!("Starting products API server...");

  let app_state = match AppState::from_config(app_config.clone()).await {
    Ok(state) => state,
    Err(e) => {
      tracing::error!(error = %e, "Failed to initialise the product store.");
      return Err(std::io::Error::other(e));
    }
  };
  tracing::info!(store = app_state.backend.as_str(), "Product store ready.");

  let server_address = app_config.bind_address();
  tracing::info!("Attempting to bind server to {} (public base {})...", server_address, app_config.app_base_url);

  HttpServer::new(move || build_app(app_state.clone()))
    .bind(&server_address)?
    .run()
    .await
}
