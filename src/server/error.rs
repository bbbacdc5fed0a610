//! Server error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::api::ErrorResponse;
use crate::exec::ExecError;

/// Errors returned to HTTP callers as `{"error": ...}`.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// The target is not an IPv4 literal or domain name.
    #[error("Invalid target")]
    InvalidTarget,

    /// The tool did not finish within the request deadline.
    #[error("Probe timed out")]
    Timeout,

    /// Running the diagnostic tool failed.
    #[error(transparent)]
    Exec(#[from] ExecError),
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidTarget => StatusCode::BAD_REQUEST,
            Self::Timeout => StatusCode::GATEWAY_TIMEOUT,
            Self::Exec(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

/// Errors that stop the server itself.
#[derive(thiserror::Error, Debug)]
pub enum ServerError {
    /// Failed to bind to address.
    #[error("Failed to bind to {address}: {source}")]
    BindError {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// The server loop failed.
    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}
