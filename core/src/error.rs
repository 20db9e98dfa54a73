// scaffold/src/error.rs

//! The single error type of the request path. Every variant knows its HTTP
//! status and renders the conventional `{"detail": ...}` body, except
//! validation failures which render the field -> messages map verbatim.

use actix_web::http::{header, Method, StatusCode};
use actix_web::{HttpResponse, ResponseError};
use anyhow::Error as AnyhowError;
use serde_json::json;
use thiserror::Error;
use tracing::{event, Level};

use crate::serializer::ValidationErrors;

#[derive(Debug, Error)]
pub enum ScaffoldError {
  #[error("Not found.")]
  NotFound,

  #[error("Validation failed: {0}")]
  Validation(ValidationErrors),

  #[error("JSON parse error - {0}")]
  Parse(String),

  #[error("Unsupported media type \"{0}\" in request.")]
  UnsupportedMediaType(String),

  #[error("Method \"{method}\" not allowed.")]
  MethodNotAllowed { method: Method, allowed: &'static str },

  #[error("Could not map validated data onto the model. Source: {source}")]
  Mapping {
    #[source]
    source: serde_json::Error,
  },

  #[error("Store operation failed. Source: {source}")]
  Store {
    #[source]
    source: AnyhowError,
  },
}

// Stores return anyhow::Result; `?` in the viewset lands here.
impl From<AnyhowError> for ScaffoldError {
  fn from(err: AnyhowError) -> Self {
    ScaffoldError::Store { source: err }
  }
}

impl From<ValidationErrors> for ScaffoldError {
  fn from(errors: ValidationErrors) -> Self {
    ScaffoldError::Validation(errors)
  }
}

impl ResponseError for ScaffoldError {
  fn status_code(&self) -> StatusCode {
    match self {
      ScaffoldError::NotFound => StatusCode::NOT_FOUND,
      ScaffoldError::Validation(_) | ScaffoldError::Parse(_) => StatusCode::BAD_REQUEST,
      ScaffoldError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
      ScaffoldError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
      ScaffoldError::Mapping { .. } | ScaffoldError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    if status.is_server_error() {
      event!(Level::ERROR, error = ?self, "Responding with server error");
    } else {
      event!(Level::DEBUG, error = %self, status = status.as_u16(), "Responding with client error");
    }

    let mut builder = HttpResponse::build(status);
    match self {
      ScaffoldError::Validation(errors) => builder.json(errors),
      ScaffoldError::MethodNotAllowed { allowed, .. } => builder
        .insert_header((header::ALLOW, *allowed))
        .json(json!({ "detail": self.to_string() })),
      ScaffoldError::Mapping { .. } | ScaffoldError::Store { .. } => {
        // Internals stay in the logs.
        builder.json(json!({ "detail": "A server error occurred." }))
      }
      _ => builder.json(json!({ "detail": self.to_string() })),
    }
  }
}

pub type ScaffoldResult<T, E = ScaffoldError> = std::result::Result<T, E>;
