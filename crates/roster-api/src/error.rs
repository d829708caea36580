//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use roster_core::validate::{FieldError, ValidationErrors};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("contact not found")]
  NotFound,

  #[error("email already registered")]
  DuplicateEmail,

  #[error(transparent)]
  Invalid(ValidationErrors),

  /// The request body could not be read as a JSON object.
  #[error("malformed request body: {0}")]
  Body(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<roster_core::Error> for ApiError {
  fn from(e: roster_core::Error) -> Self {
    match e {
      roster_core::Error::NotFound(_) => Self::NotFound,
      roster_core::Error::DuplicateEmail(_) => Self::DuplicateEmail,
      roster_core::Error::Validation(errs) => Self::Invalid(errs),
      roster_core::Error::Store(e) => Self::Store(e),
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self { Self::Body(rejection.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match &self {
      ApiError::NotFound => {
        (StatusCode::NOT_FOUND, Json(json!({ "error": "Contact not found" })))
          .into_response()
      }
      ApiError::DuplicateEmail => (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": "Email already registered" })),
      )
        .into_response(),
      ApiError::Invalid(errs) => {
        let fields: &[FieldError] = &errs.errors;
        (
          StatusCode::UNPROCESSABLE_ENTITY,
          Json(json!({ "error": self.to_string(), "fields": fields })),
        )
          .into_response()
      }
      ApiError::Body(_) => (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "error": self.to_string() })),
      )
        .into_response(),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          Json(json!({ "error": e.to_string() })),
        )
          .into_response()
      }
    }
  }
}
