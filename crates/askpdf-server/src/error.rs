//! HTTP error mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

/// Result type alias for HTTP handlers.
pub type Result<T> = std::result::Result<T, Error>;

/// Error returned by HTTP handlers, rendered as a JSON body.
#[derive(Debug)]
pub struct Error {
    status: StatusCode,
    message: String,
}

/// JSON body for error responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable description of the failure.
    pub error: String,
}

impl Error {
    /// Creates a 400 error for malformed requests.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// Returns the response status.
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<askpdf_core::Error> for Error {
    fn from(error: askpdf_core::Error) -> Self {
        use askpdf_core::Error as Core;

        let status = match &error {
            Core::Ingestion(_) | Core::Session(_) => StatusCode::BAD_REQUEST,
            Core::Provider { .. } => StatusCode::BAD_GATEWAY,
            Core::Config(_) | Core::Serialization(_) | Core::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        Self {
            status,
            message: error.to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_map_to_status_codes() {
        let ingest: Error = askpdf_core::Error::ingestion("bad pdf").into();
        assert_eq!(ingest.status(), StatusCode::BAD_REQUEST);

        let provider: Error = askpdf_core::Error::provider("openai", "quota").into();
        assert_eq!(provider.status(), StatusCode::BAD_GATEWAY);

        let config: Error = askpdf_core::Error::config("bad url").into();
        assert_eq!(config.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
