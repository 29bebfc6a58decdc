//! Error codes shared across the domain and HTTP layers.

use std::fmt;

/// Stable, machine-readable error codes.
///
/// The string form is what clients see in the `error_code` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request errors
    InvalidPayload,
    MethodNotAllowed,

    // Authentication errors
    SignatureRequired,
    InvalidSignature,

    // Downstream errors
    OptOutFailed,

    // Infrastructure errors
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidPayload => "INVALID_PAYLOAD",
            ErrorCode::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            ErrorCode::SignatureRequired => "SIGNATURE_REQUIRED",
            ErrorCode::InvalidSignature => "INVALID_SIGNATURE",
            ErrorCode::OptOutFailed => "OPT_OUT_FAILED",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}
