// products_app/src/lib.rs

//! A CRUD REST API for products, mounted at `/api/products/`.

pub mod config;
pub mod errors;
pub mod models;
pub mod serializers;
pub mod state;
pub mod store;
pub mod telemetry;
pub mod web;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::{NormalizePath, TrailingSlash};
use actix_web::App;

use crate::state::AppState;

/// Builds the application for one worker.
pub fn build_app(
  app_state: AppState,
) -> App<
  impl ServiceFactory<
    ServiceRequest,
    Config = (),
    Response = ServiceResponse<impl MessageBody>,
    Error = actix_web::Error,
    InitError = (),
  >,
> {
  App::new()
    .app_data(actix_web::web::Data::new(app_state.clone()))
    .configure(|cfg| web::configure_app_routes(cfg, &app_state))
    .default_service(actix_web::web::to(scaffold::router::not_found))
    .wrap(NormalizePath::new(TrailingSlash::Always)) // "/api/products" serves "/api/products/"
    .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
}
