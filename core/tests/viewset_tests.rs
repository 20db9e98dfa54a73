// tests/viewset_tests.rs
mod common;

use std::io;
use std::sync::Arc;

use actix_web::http::{header, Method, StatusCode};
use actix_web::{test, App};
use common::*;
use parking_lot::Mutex;
use scaffold::{MemoryStore, ModelStore};
use serde_json::{json, Value};
use tracing::Level;

#[actix_web::test]
async fn test_create_then_retrieve_round_trips() {
  setup_tracing();
  let store = Arc::new(MemoryStore::<Gadget>::new());
  let app = test::init_service(App::new().configure(configure(store.clone()))).await;

  let req = test::TestRequest::post()
    .uri("/api/gadgets/")
    .set_json(json!({ "label": "Sprocket", "price": "4.5" }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let location = resp.headers().get(header::LOCATION).unwrap().to_str().unwrap().to_string();
  assert!(location.ends_with("/api/gadgets/1/"), "unexpected location {}", location);
  let created: Value = test::read_body_json(resp).await;
  assert_eq!(
    created,
    json!({ "id": 1, "label": "Sprocket", "price": "4.50", "in_stock": true, "notes": "" })
  );

  let req = test::TestRequest::get().uri("/api/gadgets/1/").to_request();
  let fetched: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(fetched, created);
  assert_eq!(store.count().await.unwrap(), 1);
}

#[actix_web::test]
async fn test_list_returns_every_row() {
  setup_tracing();
  let store = Arc::new(MemoryStore::<Gadget>::new());
  let app = test::init_service(App::new().configure(configure(store))).await;

  for label in ["a", "b", "c"] {
    let req = test::TestRequest::post()
      .uri("/api/gadgets/")
      .set_json(json!({ "label": label, "price": 1 }))
      .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
  }

  let req = test::TestRequest::get().uri("/api/gadgets/").to_request();
  let listed: Vec<Value> = test::call_and_read_body_json(&app, req).await;
  assert_eq!(listed.len(), 3);
  let labels = listed.iter().map(|g| g["label"].as_str().unwrap()).collect::<Vec<_>>();
  assert_eq!(labels, vec!["a", "b", "c"]);
}

#[actix_web::test]
async fn test_create_with_missing_fields_persists_nothing() {
  setup_tracing();
  let store = Arc::new(MemoryStore::<Gadget>::new());
  let app = test::init_service(App::new().configure(configure(store.clone()))).await;

  let req = test::TestRequest::post()
    .uri("/api/gadgets/")
    .set_json(json!({ "price": "abc", "in_stock": "maybe" }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let errors: Value = test::read_body_json(resp).await;
  assert_eq!(
    errors,
    json!({
      "label": ["This field is required."],
      "price": ["A valid number is required."],
      "in_stock": ["Must be a valid boolean."]
    })
  );
  assert_eq!(store.count().await.unwrap(), 0);
}

#[actix_web::test]
async fn test_partial_update_changes_only_supplied_fields() {
  setup_tracing();
  let store = Arc::new(MemoryStore::<Gadget>::new());
  let app = test::init_service(App::new().configure(configure(store))).await;

  let req = test::TestRequest::post()
    .uri("/api/gadgets/")
    .set_json(json!({ "label": "Lamp", "price": "20", "notes": "brass" }))
    .to_request();
  test::call_service(&app, req).await;

  let req = test::TestRequest::patch()
    .uri("/api/gadgets/1/")
    .set_json(json!({ "in_stock": false }))
    .to_request();
  let patched: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(
    patched,
    json!({ "id": 1, "label": "Lamp", "price": "20.00", "in_stock": false, "notes": "brass" })
  );
}

#[actix_web::test]
async fn test_full_update_requires_every_required_field() {
  setup_tracing();
  let store = Arc::new(MemoryStore::<Gadget>::new());
  let app = test::init_service(App::new().configure(configure(store))).await;

  let req = test::TestRequest::post()
    .uri("/api/gadgets/")
    .set_json(json!({ "label": "Lamp", "price": "20" }))
    .to_request();
  test::call_service(&app, req).await;

  let req = test::TestRequest::put()
    .uri("/api/gadgets/1/")
    .set_json(json!({ "label": "Desk lamp" }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let errors: Value = test::read_body_json(resp).await;
  assert_eq!(errors, json!({ "price": ["This field is required."] }));

  // The rejected PUT left the row untouched.
  let req = test::TestRequest::get().uri("/api/gadgets/1/").to_request();
  let unchanged: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(
    unchanged,
    json!({ "id": 1, "label": "Lamp", "price": "20.00", "in_stock": true, "notes": "" })
  );

  let req = test::TestRequest::put()
    .uri("/api/gadgets/1/")
    .set_json(json!({ "label": "Desk lamp", "price": "25.50" }))
    .to_request();
  let updated: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(updated["label"], json!("Desk lamp"));
  assert_eq!(updated["price"], json!("25.50"));
  // Omitted optional fields keep their stored value.
  assert_eq!(updated["in_stock"], json!(true));
}

#[actix_web::test]
async fn test_destroy_then_retrieve_is_not_found() {
  setup_tracing();
  let store = Arc::new(MemoryStore::<Gadget>::new());
  let app = test::init_service(App::new().configure(configure(store.clone()))).await;

  let req = test::TestRequest::post()
    .uri("/api/gadgets/")
    .set_json(json!({ "label": "Fuse", "price": "0.25" }))
    .to_request();
  test::call_service(&app, req).await;

  let req = test::TestRequest::delete().uri("/api/gadgets/1/").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::NO_CONTENT);
  assert!(test::read_body(resp).await.is_empty());

  let req = test::TestRequest::get().uri("/api/gadgets/1/").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({ "detail": "Not found." }));

  let req = test::TestRequest::delete().uri("/api/gadgets/1/").to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
  assert_eq!(store.count().await.unwrap(), 0);
}

#[actix_web::test]
async fn test_unknown_and_malformed_keys_are_not_found() {
  setup_tracing();
  let store = Arc::new(MemoryStore::<Gadget>::new());
  let app = test::init_service(App::new().configure(configure(store))).await;

  for uri in ["/api/gadgets/7/", "/api/gadgets/seven/"] {
    let req = test::TestRequest::get().uri(uri).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    let req = test::TestRequest::patch()
      .uri(uri)
      .set_json(json!({ "label": "x" }))
      .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    let req = test::TestRequest::put()
      .uri(uri)
      .set_json(json!({ "label": "x", "price": "1.00" }))
      .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    let req = test::TestRequest::delete().uri(uri).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
  }
}

#[actix_web::test]
async fn test_bad_bodies_are_rejected_before_validation() {
  setup_tracing();
  let store = Arc::new(MemoryStore::<Gadget>::new());
  let app = test::init_service(App::new().configure(configure(store.clone()))).await;

  let req = test::TestRequest::post()
    .uri("/api/gadgets/")
    .insert_header((header::CONTENT_TYPE, "application/json"))
    .set_payload("{\"label\": ")
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert!(body["detail"].as_str().unwrap().starts_with("JSON parse error - "));

  let req = test::TestRequest::post()
    .uri("/api/gadgets/")
    .insert_header((header::CONTENT_TYPE, "text/plain"))
    .set_payload("label=Fuse")
    .to_request();
  assert_eq!(
    test::call_service(&app, req).await.status(),
    StatusCode::UNSUPPORTED_MEDIA_TYPE
  );

  let req = test::TestRequest::post()
    .uri("/api/gadgets/")
    .set_json(json!(["label", "Fuse"]))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(
    body,
    json!({ "non_field_errors": ["Invalid data. Expected a dictionary, but got list."] })
  );
  assert_eq!(store.count().await.unwrap(), 0);
}

#[actix_web::test]
async fn test_unsupported_methods_are_405_with_allow() {
  setup_tracing();
  let store = Arc::new(MemoryStore::<Gadget>::new());
  let app = test::init_service(App::new().configure(configure(store))).await;

  let req = test::TestRequest::delete().uri("/api/gadgets/").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
  assert_eq!(resp.headers().get(header::ALLOW).unwrap(), "GET, POST, HEAD, OPTIONS");
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({ "detail": "Method \"DELETE\" not allowed." }));

  let req = test::TestRequest::post().uri("/api/gadgets/1/").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
  assert_eq!(
    resp.headers().get(header::ALLOW).unwrap(),
    "GET, PUT, PATCH, DELETE, HEAD, OPTIONS"
  );
}

#[actix_web::test]
async fn test_head_is_answered_like_get() {
  setup_tracing();
  let store = Arc::new(MemoryStore::<Gadget>::new());
  let app = test::init_service(App::new().configure(configure(store))).await;

  let req = test::TestRequest::post()
    .uri("/api/gadgets/")
    .set_json(json!({ "label": "Fuse", "price": "0.25" }))
    .to_request();
  test::call_service(&app, req).await;

  for (uri, status) in [
    ("/api/gadgets/", StatusCode::OK),
    ("/api/gadgets/1/", StatusCode::OK),
    ("/api/gadgets/2/", StatusCode::NOT_FOUND),
  ] {
    let req = test::TestRequest::default().method(Method::HEAD).uri(uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), status, "HEAD {}", uri);
    assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "application/json");
  }
}

/// `io::Write` into a shared buffer, for asserting on emitted log lines.
#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLog {
  fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
    self.0.lock().extend_from_slice(buf);
    Ok(buf.len())
  }

  fn flush(&mut self) -> io::Result<()> {
    Ok(())
  }
}

impl CapturedLog {
  fn contents(&self) -> String {
    String::from_utf8_lossy(&self.0.lock()).into_owned()
  }
}

#[actix_web::test]
async fn test_client_errors_are_not_logged_as_errors() {
  let log = CapturedLog::default();
  let writer = log.clone();
  let subscriber = tracing_subscriber::fmt()
    .with_max_level(Level::ERROR)
    .with_ansi(false)
    .with_writer(move || writer.clone())
    .finish();
  let _guard = tracing::subscriber::set_default(subscriber);

  let store = Arc::new(MemoryStore::<Gadget>::new());
  let app = test::init_service(App::new().configure(configure(store))).await;

  let req = test::TestRequest::get().uri("/api/gadgets/42/").to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
  let req = test::TestRequest::post()
    .uri("/api/gadgets/")
    .set_json(json!({ "price": "abc" }))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

  tracing::error!("capture check");
  let captured = log.contents();
  assert!(captured.contains("capture check"), "nothing captured: {:?}", captured);
  assert_eq!(captured.lines().count(), 1, "unexpected ERROR lines: {}", captured);
}

#[actix_web::test]
async fn test_options_describes_fields() {
  setup_tracing();
  let store = Arc::new(MemoryStore::<Gadget>::new());
  let app = test::init_service(App::new().configure(configure(store))).await;

  let req = test::TestRequest::default()
    .method(Method::OPTIONS)
    .uri("/api/gadgets/")
    .to_request();
  let meta: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(meta["name"], json!("Gadget List"));
  assert_eq!(meta["parses"], json!(["application/json"]));
  let post = &meta["actions"]["POST"];
  assert_eq!(post["id"]["read_only"], json!(true));
  assert_eq!(post["label"]["max_length"], json!(40));
  assert_eq!(post["price"]["type"], json!("decimal"));
  assert_eq!(post["in_stock"]["required"], json!(false));

  // No row, so nothing to PUT.
  let req = test::TestRequest::default()
    .method(Method::OPTIONS)
    .uri("/api/gadgets/9/")
    .to_request();
  let meta: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(meta["name"], json!("Gadget Instance"));
  assert!(meta.get("actions").is_none());
}
