//! Registrar used when no consent service is configured.
//!
//! Logs the opt-out and reports success. Only wired outside production;
//! configuration validation refuses a production setup without a CIAM URL.

use async_trait::async_trait;

use crate::ports::{OptOutError, OptOutRegistrar, OptOutRegistration};

/// Accepts every opt-out and writes it to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingOptOutRegistrar;

impl LoggingOptOutRegistrar {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OptOutRegistrar for LoggingOptOutRegistrar {
    async fn register(&self, registration: OptOutRegistration) -> Result<(), OptOutError> {
        tracing::warn!(
            attempt = registration.attempt,
            phone_number = ?registration.caller.phone_number,
            message_id = ?registration.caller.message_id,
            "No CIAM endpoint configured; opt-out logged only"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::voice::{Attempt, CallerMetadata};

    #[tokio::test]
    async fn always_succeeds() {
        let registrar = LoggingOptOutRegistrar::new();
        let registration =
            OptOutRegistration::new("1", Attempt::FIRST, Timestamp::now(), CallerMetadata::default());

        assert!(registrar.register(registration).await.is_ok());
    }
}
