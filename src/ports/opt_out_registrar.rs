//! Opt-out registrar port for the external consent (CIAM) service.
//!
//! Registers that a caller has withdrawn consent for future contact.
//!
//! # Design
//!
//! - **Single shot**: callers invoke it once per opt-out and never retry
//! - **Idempotent upstream**: repeat registrations for the same caller are
//!   assumed harmless to the registration service, not enforced here
//! - **Outcome only**: success or failure, no response body is consumed

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;
use crate::domain::voice::{Attempt, CallerMetadata};

/// Port for opt-out registration.
#[async_trait]
pub trait OptOutRegistrar: Send + Sync {
    /// Register the opt-out. Resolves once the registration service has
    /// accepted or refused it.
    async fn register(&self, registration: OptOutRegistration) -> Result<(), OptOutError>;
}

/// Payload sent to the registration service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptOutRegistration {
    /// The digits the caller entered.
    pub digits: String,

    /// Collect round in which the opt-out happened.
    pub attempt: u32,

    /// When the opt-out was received.
    pub timestamp: Timestamp,

    /// Vendor identifiers, passed through untouched.
    #[serde(flatten)]
    pub caller: CallerMetadata,
}

impl OptOutRegistration {
    pub fn new(
        digits: impl Into<String>,
        attempt: Attempt,
        timestamp: Timestamp,
        caller: CallerMetadata,
    ) -> Self {
        Self {
            digits: digits.into(),
            attempt: attempt.value(),
            timestamp,
            caller,
        }
    }

    /// Key the registration service can use to collapse duplicates.
    pub fn idempotency_key(&self) -> Option<&str> {
        self.caller.idempotency_key()
    }
}

/// Error from the registration service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptOutError {
    /// Error code for categorization.
    pub code: OptOutErrorCode,

    /// Human-readable message.
    pub message: String,

    /// HTTP status returned by the service (if any).
    pub status: Option<u16>,
}

impl OptOutError {
    pub fn new(code: OptOutErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status: None,
        }
    }

    /// The service answered with a non-success status.
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self {
            code: OptOutErrorCode::Rejected,
            message: message.into(),
            status: Some(status),
        }
    }

    /// The request never got a response (connect, TLS, timeout).
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(OptOutErrorCode::Transport, message)
    }

    pub fn not_configured(message: impl Into<String>) -> Self {
        Self::new(OptOutErrorCode::NotConfigured, message)
    }
}

impl std::fmt::Display for OptOutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} ({}): {}", self.code, status, self.message),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}

impl std::error::Error for OptOutError {}

/// Opt-out error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptOutErrorCode {
    /// No registration endpoint is configured.
    NotConfigured,

    /// The service refused the registration.
    Rejected,

    /// Network, TLS or timeout failure.
    Transport,
}

impl std::fmt::Display for OptOutErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OptOutErrorCode::NotConfigured => "not_configured",
            OptOutErrorCode::Rejected => "rejected",
            OptOutErrorCode::Transport => "transport",
        };
        write!(f, "{}", s)
    }
}
