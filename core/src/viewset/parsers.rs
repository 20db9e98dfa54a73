// scaffold/src/viewset/parsers.rs

//! Request body parsing. Only JSON is accepted.

use actix_web::http::header::CONTENT_TYPE;
use actix_web::web::Bytes;
use actix_web::HttpRequest;
use serde_json::{Map, Value};

use crate::error::{ScaffoldError, ScaffoldResult};

pub const JSON_MEDIA_TYPE: &str = "application/json";

fn is_json_media_type(content_type: &str) -> bool {
  let essence = content_type.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
  essence == JSON_MEDIA_TYPE || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// Parses the request body into a JSON value.
///
/// An empty body is an empty object. A body without a `Content-Type` header is
/// assumed to be JSON.
pub fn parse_body(req: &HttpRequest, body: &Bytes) -> ScaffoldResult<Value> {
  if body.iter().all(u8::is_ascii_whitespace) {
    return Ok(Value::Object(Map::new()));
  }

  if let Some(content_type) = req.headers().get(CONTENT_TYPE) {
    let content_type = content_type.to_str().unwrap_or_default();
    if !is_json_media_type(content_type) {
      return Err(ScaffoldError::UnsupportedMediaType(content_type.to_string()));
    }
  }

  serde_json::from_slice(body).map_err(|e| ScaffoldError::Parse(e.to_string()))
}
