//! Error responses: `{"detail": "..."}` with a 4xx/5xx status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::any::Any;
use tubefetch_core::fetch::FetchError;
use tubefetch_core::request::ModeError;

const INTERNAL_ERROR: &str = "Internal server error";
const DOWNLOAD_FAILED: &str = "Download failed after repeated attempts";

#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

/// Turns a handler panic into a logged 500 instead of a dropped connection.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let reason = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");
    tracing::error!(panic = reason, "request handler panicked");
    ApiError::internal(INTERNAL_ERROR).into_response()
}

#[cfg(test)]
impl ApiError {
    fn status(&self) -> StatusCode {
        self.status
    }

    fn message(&self) -> &str {
        &self.message
    }
}

impl From<ModeError> for ApiError {
    fn from(err: ModeError) -> Self {
        Self::bad_request(err.to_string())
    }
}

/// Validation errors keep their message; engine details stay in the log.
impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::InvalidUrl(e) => Self::bad_request(e.to_string()),
            FetchError::ExhaustedRetries { .. } => Self::internal(DOWNLOAD_FAILED),
            FetchError::OutputDir { .. } => Self::internal(INTERNAL_ERROR),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            detail: self.message,
        });
        (self.status, body).into_response()
    }
}
