use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Failures raised by the link mapping and its persisted snapshot.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("short code already exists: {0}")]
    DuplicateCode(String),

    #[error("invalid link: {0}")]
    InvalidLink(&'static str),

    #[error("I/O error during {operation} on '{}': {source}", .path.display())]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt snapshot '{}': {message}", .path.display())]
    Corrupt { path: PathBuf, message: String },

    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Everything a request handler can fail with.
///
/// Client-facing kinds carry the exact plain-text body sent back; storage and
/// internal faults are logged and collapse into a bare 500.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(&'static str),

    #[error("Short code already exists")]
    DuplicateCode,

    #[error("Short URL not found")]
    NotFound,

    #[error("404 Page Not Found!!")]
    RouteNotFound,

    #[error("storage error: {0}")]
    Storage(StoreError),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateCode(_) => AppError::DuplicateCode,
            StoreError::InvalidLink(msg) => AppError::Validation(msg),
            other => AppError::Storage(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) | AppError::DuplicateCode => StatusCode::BAD_REQUEST,
            AppError::NotFound | AppError::RouteNotFound => StatusCode::NOT_FOUND,
            AppError::Storage(_) | AppError::Internal(_) => {
                tracing::error!("Request failed: {}", self);
                return internal_error();
            }
        };
        (status, self.to_string()).into_response()
    }
}

/// The generic 500 used for every fault that escapes handler logic.
pub fn internal_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}
