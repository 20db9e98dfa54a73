// products_app/src/web/handlers/health_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::{error, instrument};

use crate::state::AppState;

/// Reports whether the product store answers a trivial query.
#[instrument(name = "handler::health_check", skip(app_state), fields(store = app_state.backend.as_str()))]
pub async fn health_check_handler(app_state: web::Data<AppState>) -> HttpResponse {
  let store = app_state.backend.as_str();
  match app_state.products.count().await {
    Ok(_) => HttpResponse::Ok().json(json!({ "status": "ok", "store": store })),
    Err(e) => {
      error!(error = ?e, "Product store is not answering.");
      HttpResponse::ServiceUnavailable().json(json!({ "status": "unavailable", "store": store }))
    }
  }
}
