//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error body is `{"error": <kind>, "message": <text>}`; validation
//! errors add `"field"`. The `kind` string is stable so clients can tell bad
//! input from a missing session from a refused action.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Core(#[from] tracker_core::Error),

  /// The body could not be parsed into the expected shape.
  #[error("bad request: {0}")]
  BadRequest(String),

  /// A login attempt with a wrong password or unknown access code.
  #[error("invalid credentials")]
  InvalidCredentials,
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    Self::BadRequest(rejection.body_text())
  }
}

/// Convert any engine error into an [`ApiError`].
pub fn store_error<E: Into<tracker_core::Error>>(err: E) -> ApiError {
  ApiError::Core(err.into())
}

impl ApiError {
  fn status(&self) -> StatusCode {
    use tracker_core::Error as E;
    match self {
      Self::Core(e) => match e {
        E::Validation(_) => StatusCode::BAD_REQUEST,
        E::Unauthenticated => StatusCode::UNAUTHORIZED,
        E::Forbidden(_) => StatusCode::FORBIDDEN,
        E::NotFound(_) | E::ConstraintViolation(_) => StatusCode::NOT_FOUND,
        E::UniqueViolation(_) => StatusCode::CONFLICT,
        E::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        E::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
      },
      Self::BadRequest(_) => StatusCode::BAD_REQUEST,
      Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
    }
  }

  fn kind(&self) -> &'static str {
    match self {
      Self::Core(e) => e.kind(),
      Self::BadRequest(_) => "bad_request",
      Self::InvalidCredentials => "invalid_credentials",
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let message = self.to_string();

    if status.is_server_error() {
      error!(error = %message, "request failed");
    } else if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
      warn!(error = %message, "request refused");
    }

    let body = match &self {
      Self::Core(tracker_core::Error::Validation(v)) => json!({
        "error":   self.kind(),
        "field":   v.field(),
        "message": message,
      }),
      _ => json!({ "error": self.kind(), "message": message }),
    };
    (status, Json(body)).into_response()
  }
}
