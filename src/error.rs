//! Error types for the questline server

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] sea_orm::DbErr),

  #[error("user not found")]
  UserNotFound,

  #[error("post not found")]
  PostNotFound,

  #[error("listing not found")]
  ListingNotFound,

  #[error("authentication required")]
  Unauthenticated,

  #[error("admin privileges required")]
  Forbidden,

  #[error("internal error: {0}")]
  Internal(String),
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      Error::Database(_) => {
        (StatusCode::INTERNAL_SERVER_ERROR, "Database error")
      }
      Error::UserNotFound => (StatusCode::NOT_FOUND, "User not found"),
      Error::PostNotFound => (StatusCode::NOT_FOUND, "Post not found"),
      Error::ListingNotFound => (StatusCode::NOT_FOUND, "Listing not found"),
      Error::Unauthenticated => {
        (StatusCode::UNAUTHORIZED, "Authentication required")
      }
      Error::Forbidden => (StatusCode::FORBIDDEN, "Admin privileges required"),
      Error::Internal(_) => {
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
      }
    };

    if status.is_server_error() {
      tracing::error!("request failed: {self}");
    }

    let body = json::json!({
      "success": false,
      "error": message
    });

    (status, axum::Json(body)).into_response()
  }
}

pub type Result<T> = std::result::Result<T, Error>;
