//! API Error Mapping
//!
//! Turns [`Error`] into an HTTP status plus a JSON body. Missing and foreign
//! resources share one 404 shape. Server-side failures are logged and answered
//! with a generic message.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::errors::Error;

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code
    pub code: String,
    /// Error message
    pub message: String,
}

impl Error {
    /// Get HTTP status code for this error
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::ListNotFound { .. } | Self::ItemNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            Self::Config { .. }
            | Self::Database(_)
            | Self::CorruptDecimal { .. }
            | Self::AmountOutOfRange { .. }
            | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::ListNotFound { .. } | Self::ItemNotFound { .. } => "NOT_FOUND",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Unauthenticated { .. } => "UNAUTHENTICATED",
            Self::Config { .. }
            | Self::Database(_)
            | Self::CorruptDecimal { .. }
            | Self::AmountOutOfRange { .. }
            | Self::Io(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if status.is_server_error() {
            error!(error = %self, "Request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorResponse {
            code: self.error_code().to_string(),
            message,
        };

        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
