//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Each core error class maps to its own status code, so clients can act on
//! the status alone — 409 for conflicts, 404 for missing resources, 403 for
//! ownership failures, 500 for persistence faults.

use axum::{
  Json,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("unauthorized")]
  Unauthorized,

  #[error("forbidden: {0}")]
  Forbidden(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("internal error: {0}")]
  Internal(String),
}

impl ApiError {
  /// Map a store failure onto the matching response class.
  pub fn from_store<E: Into<banter_core::Error>>(err: E) -> Self {
    use banter_core::Error as Core;
    match err.into() {
      e @ (Core::DuplicateEmail(_) | Core::StaleWrite(_)) => Self::Conflict(e.to_string()),
      e @ (Core::AccountNotFound(_) | Core::ProfileNotFound(_) | Core::CommentNotFound(_)) => {
        Self::NotFound(e.to_string())
      }
      e @ Core::NotCommentAuthor { .. } => Self::Forbidden(e.to_string()),
      Core::Storage(msg) => Self::Internal(msg),
    }
  }

  fn status(&self) -> StatusCode {
    match self {
      Self::Unauthorized => StatusCode::UNAUTHORIZED,
      Self::Forbidden(_) => StatusCode::FORBIDDEN,
      Self::NotFound(_) => StatusCode::NOT_FOUND,
      Self::Conflict(_) => StatusCode::CONFLICT,
      Self::BadRequest(_) => StatusCode::BAD_REQUEST,
      Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let mut res = (status, Json(json!({ "error": self.to_string() }))).into_response();
    if status == StatusCode::UNAUTHORIZED {
      res
        .headers_mut()
        .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
    }
    res
  }
}
