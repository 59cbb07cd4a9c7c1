//! API error mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;
use crate::DocuscanError;

/// Error returned from API handlers.
///
/// Wraps a [`DocuscanError`] together with the HTTP status it maps to.
/// Validation problems become 400, everything else 500.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    inner: DocuscanError,
}

impl ApiError {
    pub fn validation(inner: DocuscanError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            inner,
        }
    }

    pub fn internal(inner: DocuscanError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            inner,
        }
    }

    fn error_type(&self) -> &'static str {
        match &self.inner {
            DocuscanError::Io(_) => "Io",
            DocuscanError::Ocr { .. } => "Ocr",
            DocuscanError::Parsing { .. } => "Parsing",
            DocuscanError::Validation { .. } => "Validation",
            DocuscanError::Serialization { .. } => "Serialization",
            DocuscanError::ImageProcessing { .. } => "ImageProcessing",
            DocuscanError::MissingDependency(_) => "MissingDependency",
            DocuscanError::Other(_) => "Other",
        }
    }
}

impl From<DocuscanError> for ApiError {
    fn from(inner: DocuscanError) -> Self {
        match inner {
            DocuscanError::Validation { .. } => Self::validation(inner),
            _ => Self::internal(inner),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(error = %self.inner, "request failed");
        }

        let body = ErrorResponse {
            error_type: self.error_type().to_string(),
            message: self.inner.to_string(),
            status_code: self.status.as_u16(),
        };

        (self.status, Json(body)).into_response()
    }
}
