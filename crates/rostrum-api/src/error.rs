//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! This is where the core's typed taxonomy meets HTTP: credential failures
//! are 401, denials 403, state conflicts 409, storage trouble 503. The
//! body is always `{"error": "<message>"}`.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Auth(#[from] rostrum_token::AuthError),

  #[error(transparent)]
  Core(#[from] rostrum_core::Error),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  /// Unknown email or wrong password. One message for both, so login
  /// probes cannot enumerate accounts.
  #[error("invalid credentials")]
  BadLogin,

  #[error("email already registered: {0}")]
  DuplicateEmail(String),

  #[error("internal error: {0}")]
  Internal(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    use rostrum_core::Error as Core;

    let status = match &self {
      ApiError::Auth(_) | ApiError::BadLogin => StatusCode::UNAUTHORIZED,
      ApiError::Core(Core::Forbidden(_)) => StatusCode::FORBIDDEN,
      ApiError::Core(Core::NotFound(_)) | ApiError::NotFound(_) => {
        StatusCode::NOT_FOUND
      }
      ApiError::Core(Core::Conflict(_)) | ApiError::DuplicateEmail(_) => {
        StatusCode::CONFLICT
      }
      ApiError::Core(Core::InvalidInput(_)) | ApiError::BadRequest(_) => {
        StatusCode::BAD_REQUEST
      }
      ApiError::Core(Core::Unavailable(_)) | ApiError::Store(_) => {
        StatusCode::SERVICE_UNAVAILABLE
      }
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
