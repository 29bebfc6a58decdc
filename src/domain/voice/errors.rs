//! Errors raised while handling a voice webhook.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | InvalidPayload | 400 |
//! | MissingSignature | 401 |
//! | InvalidSignature | 401 |
//! | OptOutRegistrationFailed | 500 |
//! | Internal | 500 |

use thiserror::Error;

use crate::domain::foundation::ErrorCode;

/// Failure of a voice webhook request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VoiceFlowError {
    /// The request body could not be read as a webhook payload.
    #[error("invalid webhook payload: {0}")]
    InvalidPayload(String),

    /// Signature verification is enabled and the header is absent.
    #[error("webhook signature header missing")]
    MissingSignature,

    /// The signature header was malformed, stale, or did not match.
    #[error("invalid webhook signature: {0}")]
    InvalidSignature(String),

    /// The registration service did not accept the opt-out.
    ///
    /// The opt-out is treated as not having happened.
    #[error("opt-out registration failed: {0}")]
    OptOutRegistrationFailed(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl VoiceFlowError {
    pub fn invalid_payload(reason: impl Into<String>) -> Self {
        VoiceFlowError::InvalidPayload(reason.into())
    }

    pub fn invalid_signature(reason: impl Into<String>) -> Self {
        VoiceFlowError::InvalidSignature(reason.into())
    }

    pub fn opt_out_failed(reason: impl Into<String>) -> Self {
        VoiceFlowError::OptOutRegistrationFailed(reason.into())
    }

    pub fn internal(reason: impl Into<String>) -> Self {
        VoiceFlowError::Internal(reason.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            VoiceFlowError::InvalidPayload(_) => ErrorCode::InvalidPayload,
            VoiceFlowError::MissingSignature => ErrorCode::SignatureRequired,
            VoiceFlowError::InvalidSignature(_) => ErrorCode::InvalidSignature,
            VoiceFlowError::OptOutRegistrationFailed(_) => ErrorCode::OptOutFailed,
            VoiceFlowError::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Message safe to return to the platform.
    ///
    /// Server-side failures collapse into one generic message; their detail
    /// only goes to the logs.
    pub fn public_message(&self) -> String {
        match self {
            VoiceFlowError::InvalidPayload(reason) => format!("Invalid payload: {}", reason),
            VoiceFlowError::MissingSignature => "Webhook signature required".to_string(),
            VoiceFlowError::InvalidSignature(_) => "Invalid webhook signature".to_string(),
            VoiceFlowError::OptOutRegistrationFailed(_) | VoiceFlowError::Internal(_) => {
                "Internal server error".to_string()
            }
        }
    }

    /// True for failures on our side (as opposed to a bad request).
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            VoiceFlowError::OptOutRegistrationFailed(_) | VoiceFlowError::Internal(_)
        )
    }
}
