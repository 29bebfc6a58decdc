//! Error responses shared by every HTTP adapter.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ErrorCode;
use crate::domain::voice::VoiceFlowError;

/// Error body returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
    /// Error code for programmatic handling.
    pub error_code: String,
}

impl ErrorResponse {
    pub fn new(error_code: impl ToString, message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            error_code: error_code.to_string(),
        }
    }

    /// The generic 500 body; never carries internal detail.
    pub fn internal() -> Self {
        Self::new(ErrorCode::InternalError, "Internal server error")
    }
}

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub struct ApiError(VoiceFlowError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            VoiceFlowError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            VoiceFlowError::MissingSignature | VoiceFlowError::InvalidSignature(_) => {
                StatusCode::UNAUTHORIZED
            }
            VoiceFlowError::OptOutRegistrationFailed(_) | VoiceFlowError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Server-side failures keep their code but never their detail.
    pub fn body(&self) -> ErrorResponse {
        ErrorResponse::new(self.0.code(), self.0.public_message())
    }

    /// Status plus the JSON body, for callers that also need to log it.
    pub fn into_parts(self) -> (StatusCode, serde_json::Value) {
        self.log();
        let status = self.status();
        let body = serde_json::to_value(self.body()).unwrap_or_else(|_| internal_json());
        (status, body)
    }

    fn log(&self) {
        if self.0.is_server_error() {
            tracing::error!(error = %self.0, code = %self.0.code(), "Voice webhook failed");
        } else {
            tracing::warn!(error = %self.0, code = %self.0.code(), "Voice webhook rejected");
        }
    }
}

impl From<VoiceFlowError> for ApiError {
    fn from(err: VoiceFlowError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.into_parts();
        (status, Json(body)).into_response()
    }
}

/// Fallback for any method a route does not serve.
pub async fn method_not_allowed() -> Response {
    let body = ErrorResponse::new(ErrorCode::MethodNotAllowed, "Method not allowed");
    (StatusCode::METHOD_NOT_ALLOWED, Json(body)).into_response()
}

/// Body used when a handler panics.
pub fn panic_response(_panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
    tracing::error!("Handler panicked; returning generic error");
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::internal())).into_response()
}

fn internal_json() -> serde_json::Value {
    serde_json::json!({
        "error": "Internal server error",
        "error_code": ErrorCode::InternalError.to_string(),
    })
}
