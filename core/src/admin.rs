// scaffold/src/admin.rs

//! A read-only administration index: the registered models, where their
//! endpoints live and how many rows each holds.

use std::sync::Arc;

use actix_web::{web, HttpRequest, HttpResponse};
use async_trait::async_trait;
use serde::Serialize;
use tracing::{event, Level};

use crate::error::ScaffoldResult;
use crate::model::Model;
use crate::router::method_not_allowed;
use crate::serializer::ModelSerializer;
use crate::viewset::ModelViewSet;

pub const ADMIN_ALLOW: &str = "GET";

/// What the admin index needs from a registered model.
#[async_trait]
pub trait AdminModel: Send + Sync {
  fn verbose_name_plural(&self) -> &str;

  fn basename(&self) -> &str;

  /// Route name of the model's collection endpoint.
  fn list_route_name(&self) -> String;

  async fn count(&self) -> anyhow::Result<usize>;
}

#[async_trait]
impl<S: ModelSerializer> AdminModel for ModelViewSet<S> {
  fn verbose_name_plural(&self) -> &str {
    <S::Model as Model>::VERBOSE_NAME_PLURAL
  }

  fn basename(&self) -> &str {
    ModelViewSet::basename(self)
  }

  fn list_route_name(&self) -> String {
    ModelViewSet::list_route_name(self)
  }

  async fn count(&self) -> anyhow::Result<usize> {
    self.store().count().await
  }
}

#[derive(Debug, Serialize)]
struct AdminEntry {
  name: String,
  basename: String,
  url: Option<String>,
  count: usize,
}

#[derive(Clone)]
pub struct AdminSite {
  site_header: String,
  models: Vec<Arc<dyn AdminModel>>,
}

impl AdminSite {
  pub fn new(site_header: impl Into<String>) -> Self {
    Self {
      site_header: site_header.into(),
      models: Vec::new(),
    }
  }

  pub fn register<A: AdminModel + 'static>(&mut self, model: Arc<A>) -> &mut Self {
    event!(Level::DEBUG, basename = %model.basename(), "Registering model with admin site.");
    self.models.push(model);
    self
  }

  /// Mounts the index at `/` of the enclosing scope.
  pub fn configure(&self, cfg: &mut web::ServiceConfig) {
    let site = self.clone();
    cfg.service(
      web::resource("/")
        .name("admin-index")
        .route(web::get().to(move |req: HttpRequest| {
          let site = site.clone();
          async move { site.index(req).await }
        }))
        .default_service(method_not_allowed(ADMIN_ALLOW)),
    );
  }

  async fn index(&self, req: HttpRequest) -> ScaffoldResult<HttpResponse> {
    let mut entries = Vec::with_capacity(self.models.len());
    for model in &self.models {
      entries.push(AdminEntry {
        name: model.verbose_name_plural().to_string(),
        basename: model.basename().to_string(),
        url: req
          .url_for_static(&model.list_route_name())
          .ok()
          .map(|url| url.path().to_string()),
        count: model.count().await?,
      });
    }
    Ok(HttpResponse::Ok().json(serde_json::json!({
      "site": self.site_header,
      "models": entries,
    })))
  }
}
