//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{JsonRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use register_core::{Classify, Failure};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Map a store error onto a response class by its [`Failure`] category.
  pub fn from_store<E>(err: E) -> Self
  where
    E: std::error::Error + Classify + Send + Sync + 'static,
  {
    match err.failure() {
      Failure::Invalid => Self::BadRequest(err.to_string()),
      Failure::NotFound => Self::NotFound(err.to_string()),
      Failure::Internal => {
        tracing::error!(error = %err, "store failure");
        Self::Store(Box::new(err))
      }
    }
  }
}

impl From<register_core::Error> for ApiError {
  fn from(err: register_core::Error) -> Self { Self::from_store(err) }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self { Self::BadRequest(rejection.body_text()) }
}

impl From<QueryRejection> for ApiError {
  fn from(rejection: QueryRejection) -> Self { Self::BadRequest(rejection.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
