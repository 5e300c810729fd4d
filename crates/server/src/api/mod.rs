//! HTTP endpoint modules.
//!
//! Shared error body lives here in mod.rs.

mod health;
mod range;
mod retrieve;

pub use health::health;
pub use range::{export_last, last_range, reload_dataset};
pub use retrieve::retrieve;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use vitals_core::{DatasetLoadError, VitalsError};

// ── Shared error type ───────────────────────────────────────────

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: &'static str,
}

/// Error returned by every handler: a status plus `{ error, kind }`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub kind: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, kind: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            kind,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            kind: self.kind,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<VitalsError> for ApiError {
    fn from(e: VitalsError) -> Self {
        match e {
            VitalsError::NoResult => ApiError::new(StatusCode::NOT_FOUND, "no_result", e.to_string()),
            VitalsError::DatasetLoad(inner) => inner.into(),
            other => ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "internal", other.to_string()),
        }
    }
}

impl From<DatasetLoadError> for ApiError {
    fn from(e: DatasetLoadError) -> Self {
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "dataset_load", e.to_string())
    }
}
