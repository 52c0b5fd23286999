//! Error-to-HTTP response conversion.
//!
//! Wraps [`imagerank_common::Error`] so route handlers can return
//! `Result<T, AppError>` and use `?` on service calls.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

pub struct AppError {
    inner: imagerank_common::Error,
}

impl AppError {
    pub fn new(inner: imagerank_common::Error) -> Self {
        Self { inner }
    }
}

impl From<imagerank_common::Error> for AppError {
    fn from(e: imagerank_common::Error) -> Self {
        Self::new(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.inner.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(
                status = %status,
                error = %self.inner,
                "Server error in handler"
            );
        } else {
            tracing::debug!(status = %status, error = %self.inner, "Rejected request");
        }

        let body = json!({
            "error": self.inner.to_string(),
            "code": self.inner.code(),
        });

        (status, axum::Json(body)).into_response()
    }
}
