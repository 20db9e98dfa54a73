// products_app/src/web/routes.rs

//! The project URL table:
//!  - `/api/`    the default router, with `products` registered
//!  - `/admin/`  the admin index
//!  - `/health/` liveness of the product store
//!
//! Paths are declared with a trailing slash; `build_app` normalizes requests
//! that omit it.

use std::sync::Arc;

use actix_web::web;
use scaffold::{AdminSite, DefaultRouter};

use crate::state::AppState;
use crate::web::handlers::health_handlers::health_check_handler;
use crate::web::handlers::product_handlers::{product_viewset, PRODUCTS_BASENAME};

// Called once per worker from the `HttpServer::new` factory.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig, app_state: &AppState) {
  let products = product_viewset(app_state);

  let mut router = DefaultRouter::new();
  router.register(PRODUCTS_BASENAME, Arc::clone(&products));

  let mut admin = AdminSite::new(app_state.config.admin_site_header.clone());
  admin.register(products);

  cfg
    .route("/health/", web::get().to(health_check_handler))
    .service(web::scope("/admin").configure(|cfg| admin.configure(cfg)))
    .service(web::scope("/api").configure(|cfg| router.configure(cfg)));
}
