// scaffold/src/router.rs

//! Defines `DefaultRouter`, a prefix-keyed registry of viewsets that mounts
//! the conventional collection / detail routes onto an actix `ServiceConfig`,
//! together with an API root listing every registration.

use std::sync::Arc;

use actix_web::web::{self, Bytes};
use actix_web::http::Method;
use actix_web::{HttpRequest, HttpResponse, Route};
use serde_json::{json, Map, Value};
use tracing::{event, Level};

use crate::error::{ScaffoldError, ScaffoldResult};
use crate::serializer::ModelSerializer;
use crate::viewset::{ActionType, ModelViewSet};

pub const API_ROOT_ROUTE: &str = "api-root";
pub const API_ROOT_ALLOW: &str = "GET, HEAD, OPTIONS";

/// Type-erased view of something the router can mount.
pub trait Routable: Send + Sync {
  fn basename(&self) -> &str;

  /// Route name of the collection endpoint, used for reverse lookups.
  fn list_route_name(&self) -> String;

  /// Adds this viewset's resources under `/{prefix}/`.
  fn mount(self: Arc<Self>, prefix: &str, cfg: &mut web::ServiceConfig);
}

fn collection_route<S: ModelSerializer>(viewset: &Arc<ModelViewSet<S>>, action: ActionType, method: Method) -> Route {
  let viewset = Arc::clone(viewset);
  web::method(method).to(move |req: HttpRequest, body: Bytes| {
    let viewset = Arc::clone(&viewset);
    async move { viewset.dispatch(action, &req, None, body).await }
  })
}

fn detail_route<S: ModelSerializer>(viewset: &Arc<ModelViewSet<S>>, action: ActionType, method: Method) -> Route {
  let viewset = Arc::clone(viewset);
  web::method(method).to(move |req: HttpRequest, pk: web::Path<String>, body: Bytes| {
    let viewset = Arc::clone(&viewset);
    async move { viewset.dispatch(action, &req, Some(pk.as_str()), body).await }
  })
}

/// Fallback route answering 405 with the given `Allow` header.
pub fn method_not_allowed(allowed: &'static str) -> Route {
  web::to(move |req: HttpRequest| async move {
    Err::<HttpResponse, _>(ScaffoldError::MethodNotAllowed {
      method: req.method().clone(),
      allowed,
    })
  })
}

impl<S: ModelSerializer> Routable for ModelViewSet<S> {
  fn basename(&self) -> &str {
    ModelViewSet::basename(self)
  }

  fn list_route_name(&self) -> String {
    ModelViewSet::list_route_name(self)
  }

  fn mount(self: Arc<Self>, prefix: &str, cfg: &mut web::ServiceConfig) {
    let mut collection = web::resource(format!("/{}/", prefix)).name(&self.list_route_name());
    for &action in ActionType::COLLECTION {
      for method in action.methods() {
        collection = collection.route(collection_route(&self, action, method));
      }
    }

    let mut detail = web::resource(format!("/{}/{{pk}}/", prefix)).name(&self.detail_route_name());
    for &action in ActionType::DETAIL {
      for method in action.methods() {
        detail = detail.route(detail_route(&self, action, method));
      }
    }

    cfg
      .service(collection.default_service(method_not_allowed(ActionType::COLLECTION_ALLOW)))
      .service(detail.default_service(method_not_allowed(ActionType::DETAIL_ALLOW)));
  }
}

#[derive(Clone)]
struct Registration {
  prefix: String,
  viewset: Arc<dyn Routable>,
}

/// Registry of viewsets keyed by URL prefix.
///
/// Cloning is cheap; `configure` is meant to be called from the
/// `HttpServer::new` factory, once per worker.
#[derive(Clone, Default)]
pub struct DefaultRouter {
  registry: Vec<Registration>,
}

impl DefaultRouter {
  pub fn new() -> Self {
    Self::default()
  }

  /// Registers `viewset` under `prefix` (surrounding slashes are ignored).
  ///
  /// Panics if the prefix or the viewset's basename is already taken: both
  /// are wiring mistakes, not runtime conditions.
  pub fn register<V: Routable + 'static>(&mut self, prefix: &str, viewset: Arc<V>) -> &mut Self {
    let prefix = prefix.trim_matches('/').to_string();
    if self.registry.iter().any(|r| r.prefix == prefix) {
      panic!("Router setup error: prefix '{}' is already registered.", prefix);
    }
    if self.registry.iter().any(|r| r.viewset.basename() == viewset.basename()) {
      panic!(
        "Router setup error: basename '{}' is already registered.",
        viewset.basename()
      );
    }
    event!(Level::DEBUG, prefix = %prefix, basename = %viewset.basename(), "Registering viewset.");
    self.registry.push(Registration { prefix, viewset });
    self
  }

  pub fn prefixes(&self) -> Vec<&str> {
    self.registry.iter().map(|r| r.prefix.as_str()).collect()
  }

  /// Mounts the API root and every registered viewset.
  pub fn configure(&self, cfg: &mut web::ServiceConfig) {
    let index = self
      .registry
      .iter()
      .map(|r| (r.prefix.clone(), r.viewset.list_route_name()))
      .collect::<Vec<_>>();
    let mut root = web::resource("/").name(API_ROOT_ROUTE);
    for method in [Method::GET, Method::HEAD] {
      let index = index.clone();
      root = root.route(web::method(method).to(move |req: HttpRequest| {
        let index = index.clone();
        async move { api_root(req, index) }
      }));
    }
    cfg.service(
      root
        .route(web::method(Method::OPTIONS).to(api_root_metadata))
        .default_service(method_not_allowed(API_ROOT_ALLOW)),
    );

    for registration in &self.registry {
      Arc::clone(&registration.viewset).mount(&registration.prefix, cfg);
    }
  }
}

fn api_root(req: HttpRequest, index: Vec<(String, String)>) -> ScaffoldResult<HttpResponse> {
  let mut links = Map::new();
  for (prefix, route_name) in index {
    let url = req
      .url_for_static(&route_name)
      .map(|url| Value::String(url.to_string()))
      .unwrap_or(Value::Null);
    links.insert(prefix, url);
  }
  Ok(HttpResponse::Ok().json(Value::Object(links)))
}

async fn api_root_metadata() -> HttpResponse {
  HttpResponse::Ok().json(json!({
    "name": "Api Root",
    "description": "The default basic root view for DefaultRouter",
    "renders": [crate::viewset::parsers::JSON_MEDIA_TYPE],
    "parses": [crate::viewset::parsers::JSON_MEDIA_TYPE],
  }))
}

/// Fallback for unmatched paths, suitable for `App::default_service`.
pub async fn not_found() -> ScaffoldResult<HttpResponse> {
  Err(ScaffoldError::NotFound)
}
