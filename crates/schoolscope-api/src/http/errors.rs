//! Connect-style error bodies with HTTP status mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use schoolscope_data::DataError;
use serde::Serialize;
use tracing::error;

const CODE_INVALID_ARGUMENT: &str = "invalid_argument";
const CODE_NOT_FOUND: &str = "not_found";
const CODE_INTERNAL: &str = "internal";
const CODE_UNAVAILABLE: &str = "unavailable";

/// Structured API error rendered as a `{code, message}` JSON body.
#[derive(Debug)]
pub(crate) struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, CODE_INVALID_ARGUMENT, message)
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, CODE_NOT_FOUND, message)
    }

    pub(crate) fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            CODE_INTERNAL,
            "internal server error",
        )
    }

    pub(crate) fn unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, CODE_UNAVAILABLE, message)
    }

    /// Map a data layer failure, logging the diagnostic and keeping the
    /// caller-facing message generic for infrastructure faults.
    pub(crate) fn from_data(operation: &'static str, error: &DataError) -> Self {
        if error.is_invalid_input() {
            return Self::invalid_argument(error.to_string());
        }
        error!(operation, error = %error, "data layer failure");
        Self::internal()
    }

    #[cfg(test)]
    pub(crate) const fn status(&self) -> StatusCode {
        self.status
    }

    #[cfg(test)]
    pub(crate) const fn code(&self) -> &'static str {
        self.code
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                code: self.code,
                message: self.message,
            }),
        )
            .into_response()
    }
}
