// scaffold/src/viewset/mod.rs

//! `ModelViewSet<S>`: the six CRUD actions (plus `OPTIONS` metadata) for one
//! model, driven entirely by its serializer `S` and a `ModelStore`.

pub mod actions;
pub mod parsers;

use std::marker::PhantomData;
use std::sync::Arc;

use actix_web::http::header;
use actix_web::web::Bytes;
use actix_web::{HttpRequest, HttpResponse};
use serde_json::{json, Map, Value};
use tracing::{event, instrument, Level};

use crate::error::{ScaffoldError, ScaffoldResult};
use crate::model::Model;
use crate::serializer::ModelSerializer;
use crate::store::ModelStore;

pub use actions::ActionType;

/// Detail routes accept any path segment; anything that is not an integer
/// simply matches no row.
pub fn parse_pk(raw: &str) -> ScaffoldResult<i64> {
  raw.trim().parse::<i64>().map_err(|_| ScaffoldError::NotFound)
}

pub struct ModelViewSet<S: ModelSerializer> {
  basename: String,
  name: String,
  store: Arc<dyn ModelStore<S::Model>>,
  _serializer: PhantomData<fn() -> S>,
}

impl<S: ModelSerializer> ModelViewSet<S> {
  /// `basename` names the routes (`{basename}-list`, `{basename}-detail`).
  /// The view name defaults to the model's plural name.
  pub fn new(basename: impl Into<String>, store: Arc<dyn ModelStore<S::Model>>) -> Self {
    Self {
      basename: basename.into(),
      name: <S::Model as Model>::VERBOSE_NAME_PLURAL.to_string(),
      store,
      _serializer: PhantomData,
    }
  }

  /// View name shown by `OPTIONS`, e.g. "Product" gives "Product List".
  pub fn with_name(mut self, name: impl Into<String>) -> Self {
    self.name = name.into();
    self
  }

  pub fn basename(&self) -> &str {
    &self.basename
  }

  pub fn store(&self) -> &Arc<dyn ModelStore<S::Model>> {
    &self.store
  }

  pub fn list_route_name(&self) -> String {
    format!("{}-list", self.basename)
  }

  pub fn detail_route_name(&self) -> String {
    format!("{}-detail", self.basename)
  }

  /// Runs `action`. `pk` is the raw path segment for detail actions.
  #[instrument(
    name = "ModelViewSet::dispatch",
    skip_all,
    fields(basename = %self.basename, action = action.name(), pk = pk.unwrap_or_default())
  )]
  pub async fn dispatch(
    &self,
    action: ActionType,
    req: &HttpRequest,
    pk: Option<&str>,
    body: Bytes,
  ) -> ScaffoldResult<HttpResponse> {
    match (action, pk) {
      (ActionType::List, _) => self.list().await,
      (ActionType::Create, _) => self.create(req, &body).await,
      (ActionType::Metadata, pk) => self.metadata(pk).await,
      (ActionType::Retrieve, Some(pk)) => self.retrieve(pk).await,
      (ActionType::Update, Some(pk)) => self.update(req, pk, &body, false).await,
      (ActionType::PartialUpdate, Some(pk)) => self.update(req, pk, &body, true).await,
      (ActionType::Destroy, Some(pk)) => self.destroy(pk).await,
      // Detail actions reached without a key have no row to act on.
      (_, None) => Err(ScaffoldError::NotFound),
    }
  }

  pub async fn list(&self) -> ScaffoldResult<HttpResponse> {
    let rows = self.store.all().await?;
    event!(Level::DEBUG, count = rows.len(), "Listing rows.");
    let rendered = rows
      .iter()
      .map(S::to_representation)
      .collect::<ScaffoldResult<Vec<_>>>()?;
    Ok(HttpResponse::Ok().json(rendered))
  }

  async fn get_object(&self, pk: &str) -> ScaffoldResult<S::Model> {
    let pk = parse_pk(pk)?;
    match self.store.get(pk).await? {
      Some(instance) => Ok(instance),
      None => {
        event!(Level::DEBUG, pk, "No row with this key.");
        Err(ScaffoldError::NotFound)
      }
    }
  }

  pub async fn retrieve(&self, pk: &str) -> ScaffoldResult<HttpResponse> {
    let instance = self.get_object(pk).await?;
    Ok(HttpResponse::Ok().json(S::to_representation(&instance)?))
  }

  pub async fn create(&self, req: &HttpRequest, body: &Bytes) -> ScaffoldResult<HttpResponse> {
    let data = parsers::parse_body(req, body)?;
    let validated = S::validate(&data, false)?;
    let created = self.store.insert(S::create(validated)?).await?;
    event!(Level::INFO, basename = %self.basename, pk = created.pk(), "Row created.");

    let mut response = HttpResponse::Created();
    if let Ok(location) = req.url_for(&self.detail_route_name(), [created.pk().to_string()]) {
      response.insert_header((header::LOCATION, location.to_string()));
    }
    Ok(response.json(S::to_representation(&created)?))
  }

  /// PUT (`partial == false`) or PATCH (`partial == true`).
  pub async fn update(&self, req: &HttpRequest, pk: &str, body: &Bytes, partial: bool) -> ScaffoldResult<HttpResponse> {
    let instance = self.get_object(pk).await?;
    let data = parsers::parse_body(req, body)?;
    let validated = S::validate(&data, partial)?;
    let changed = S::update(&instance, validated)?;
    // A concurrent delete between the read and the write surfaces as not found.
    let saved = self.store.save(changed).await?.ok_or(ScaffoldError::NotFound)?;
    event!(Level::INFO, basename = %self.basename, pk = saved.pk(), partial, "Row updated.");
    Ok(HttpResponse::Ok().json(S::to_representation(&saved)?))
  }

  pub async fn destroy(&self, pk: &str) -> ScaffoldResult<HttpResponse> {
    let instance = self.get_object(pk).await?;
    if !self.store.delete(instance.pk()).await? {
      return Err(ScaffoldError::NotFound);
    }
    event!(Level::INFO, basename = %self.basename, pk = instance.pk(), "Row deleted.");
    Ok(HttpResponse::NoContent().finish())
  }

  /// `OPTIONS`: describes the view and the fields accepted for writes. The
  /// detail form only advertises `PUT` when the row exists.
  pub async fn metadata(&self, pk: Option<&str>) -> ScaffoldResult<HttpResponse> {
    let (suffix, write_method) = match pk {
      None => ("List", Some("POST")),
      Some(pk) => match self.get_object(pk).await {
        Ok(_) => ("Instance", Some("PUT")),
        Err(ScaffoldError::NotFound) => ("Instance", None),
        Err(other) => return Err(other),
      },
    };

    let mut body = json!({
      "name": format!("{} {}", self.name, suffix),
      "description": "",
      "renders": [parsers::JSON_MEDIA_TYPE],
      "parses": [parsers::JSON_MEDIA_TYPE],
    });
    if let Some(method) = write_method {
      let mut actions = Map::new();
      actions.insert(method.to_string(), S::metadata());
      body["actions"] = Value::Object(actions);
    }
    Ok(HttpResponse::Ok().json(body))
  }
}
