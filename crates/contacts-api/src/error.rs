//! Handler errors and their JSON rendering.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use contacts_core::ContactId;
use serde_json::json;
use thiserror::Error;

/// Why a contact request failed.
///
/// Rendered as a status code plus a `{"error": "..."}` body.
#[derive(Debug, Error)]
pub enum ApiError {
  /// No contact with this id, including ids that did not parse.
  #[error("contact {0} not found")]
  NoSuchContact(ContactId),

  /// The body was not a JSON contact object.
  #[error("{0}")]
  MalformedBody(String),

  /// The backing store failed; the cause is logged, never returned.
  #[error("contact store failed")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(err))
  }

  pub fn status(&self) -> StatusCode {
    match self {
      Self::NoSuchContact(_) => StatusCode::NOT_FOUND,
      Self::MalformedBody(_) => StatusCode::BAD_REQUEST,
      Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    Self::MalformedBody(rejection.body_text())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    if let Self::Store(cause) = &self {
      tracing::error!(error = %cause, "contact store failed");
    }
    (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
  }
}
