//! Mock opt-out registrar for testing.
//!
//! Records every registration and can be told to fail, so tests can assert
//! "called exactly once with this caller" and exercise the failure path.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::ports::{OptOutError, OptOutRegistrar, OptOutRegistration};

/// Mock registrar.
///
/// # Example
///
/// ```ignore
/// let mock = MockOptOutRegistrar::new();
/// mock.set_error(OptOutError::rejected(503, "down"));
///
/// // ... drive the webhook ...
///
/// assert_eq!(mock.call_count(), 1);
/// ```
#[derive(Default, Clone)]
pub struct MockOptOutRegistrar {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Error to return from every call while set.
    error: Option<OptOutError>,

    /// Registrations received, in order.
    calls: Vec<OptOutRegistration>,
}

impl MockOptOutRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registrar whose every call fails with `error`.
    pub fn failing(error: OptOutError) -> Self {
        let mock = Self::new();
        mock.set_error(error);
        mock
    }

    pub fn set_error(&self, error: OptOutError) {
        self.lock().error = Some(error);
    }

    pub fn clear_error(&self) {
        self.lock().error = None;
    }

    pub fn calls(&self) -> Vec<OptOutRegistration> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        // A poisoned lock only means another test thread panicked mid-call.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl OptOutRegistrar for MockOptOutRegistrar {
    async fn register(&self, registration: OptOutRegistration) -> Result<(), OptOutError> {
        let mut state = self.lock();
        state.calls.push(registration);
        match &state.error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::voice::{Attempt, CallerMetadata};

    fn registration() -> OptOutRegistration {
        OptOutRegistration::new("1", Attempt::FIRST, Timestamp::now(), CallerMetadata::default())
    }

    #[tokio::test]
    async fn records_calls() {
        let mock = MockOptOutRegistrar::new();

        mock.register(registration()).await.unwrap();
        mock.register(registration()).await.unwrap();

        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn injected_error_is_returned_until_cleared() {
        let mock = MockOptOutRegistrar::failing(OptOutError::transport("timeout"));

        assert!(mock.register(registration()).await.is_err());

        mock.clear_error();
        assert!(mock.register(registration()).await.is_ok());
        assert_eq!(mock.call_count(), 2);
    }
}
