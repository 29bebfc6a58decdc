//! HandleCollectHandler - Command handler for the collect webhook.
//!
//! Runs one round of the opt-out decision engine:
//! attempt + collected input → classification → verb sequence, and, for an
//! opt-out, a single awaited registration call before anything is returned.

use std::sync::Arc;

use crate::domain::foundation::Timestamp;
use crate::domain::voice::{
    Attempt, CallAttemptContext, CallerMetadata, CollectedInput, CollectedValue,
    InputClassification, VerbSequence, VerbSequenceBuilder, VoiceFlowError,
};
use crate::ports::{OptOutRegistrar, OptOutRegistration};

/// Command carrying one collect webhook.
#[derive(Debug, Clone)]
pub struct HandleCollectCommand {
    pub attempt: Attempt,
    pub input: CollectedInput,
    pub caller: CallerMetadata,
}

/// Outcome of a collect round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandleCollectResult {
    pub attempt: Attempt,
    pub classification: InputClassification,
    pub verbs: VerbSequence,
    /// True when the registration service accepted an opt-out this round.
    pub opt_out_registered: bool,
}

/// Handler for collect webhooks.
///
/// Holds no per-call state; safe to share across concurrent requests.
pub struct HandleCollectHandler {
    builder: Arc<VerbSequenceBuilder>,
    registrar: Arc<dyn OptOutRegistrar>,
}

impl HandleCollectHandler {
    pub fn new(builder: Arc<VerbSequenceBuilder>, registrar: Arc<dyn OptOutRegistrar>) -> Self {
        Self { builder, registrar }
    }

    pub async fn handle(
        &self,
        cmd: HandleCollectCommand,
    ) -> Result<HandleCollectResult, VoiceFlowError> {
        let ctx = CallAttemptContext::new(cmd.attempt, cmd.input, cmd.caller);
        let classification = ctx.classification();

        tracing::info!(
            attempt = ctx.attempt.value(),
            classification = %classification,
            "Collect webhook received"
        );
        tracing::debug!(raw_input = ?ctx.raw_input, "Collected input");

        let verbs = self.builder.build(ctx.attempt, classification);
        tracing::debug!(
            verb_count = verbs.len(),
            ends_flow = verbs.ends_flow(),
            "Verb sequence built"
        );

        let opt_out_registered = if classification.is_opt_out() {
            self.register_opt_out(ctx).await?;
            true
        } else {
            false
        };

        Ok(HandleCollectResult {
            attempt: cmd.attempt,
            classification,
            verbs,
            opt_out_registered,
        })
    }

    async fn register_opt_out(&self, ctx: CallAttemptContext) -> Result<(), VoiceFlowError> {
        let registration = OptOutRegistration::new(
            ctx.raw_input
                .map(CollectedValue::into_string)
                .unwrap_or_default(),
            ctx.attempt,
            Timestamp::now(),
            ctx.caller,
        );

        match self.registrar.register(registration).await {
            Ok(()) => {
                tracing::info!(attempt = ctx.attempt.value(), "Opt-out registered");
                Ok(())
            }
            Err(e) => {
                tracing::error!(
                    attempt = ctx.attempt.value(),
                    error = %e,
                    "Opt-out registration failed"
                );
                Err(VoiceFlowError::opt_out_failed(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::voice::test_support::test_builder;
    use crate::domain::voice::Verb;
    use crate::ports::OptOutError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementation
    // ════════════════════════════════════════════════════════════════════════════

    struct MockRegistrar {
        calls: Mutex<Vec<OptOutRegistration>>,
        fail: bool,
    }

    impl MockRegistrar {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn calls(&self) -> Vec<OptOutRegistration> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl OptOutRegistrar for MockRegistrar {
        async fn register(&self, registration: OptOutRegistration) -> Result<(), OptOutError> {
            self.calls.lock().unwrap().push(registration);
            if self.fail {
                Err(OptOutError::rejected(503, "unavailable"))
            } else {
                Ok(())
            }
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn caller() -> CallerMetadata {
        CallerMetadata {
            from: Some("+15550100".to_string()),
            to: Some("+15550199".to_string()),
            message_id: Some("msg-1".to_string()),
            conversation_tracking_id: Some("conv-1".to_string()),
            phone_number: Some("+15550100".to_string()),
        }
    }

    fn command(attempt: u32, digits: Option<&str>) -> HandleCollectCommand {
        HandleCollectCommand {
            attempt: Attempt::new(attempt),
            input: CollectedInput {
                collected_tones: None,
                digits: digits.map(CollectedValue::from),
            },
            caller: caller(),
        }
    }

    fn handler(registrar: Arc<MockRegistrar>) -> HandleCollectHandler {
        HandleCollectHandler::new(Arc::new(test_builder()), registrar)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn opt_out_registers_once_with_caller_metadata() {
        for attempt in [1, 2] {
            let registrar = Arc::new(MockRegistrar::new());
            let result = handler(registrar.clone())
                .handle(command(attempt, Some("1")))
                .await
                .unwrap();

            assert_eq!(result.classification, InputClassification::OptOutCode);
            assert!(result.opt_out_registered);
            assert_eq!(result.verbs.len(), 1);
            assert!(result.verbs.verbs()[0].is_play());

            let calls = registrar.calls();
            assert_eq!(calls.len(), 1);
            assert_eq!(calls[0].caller, caller());
            assert_eq!(calls[0].attempt, attempt);
            assert_eq!(calls[0].digits, "1");
        }
    }

    #[tokio::test]
    async fn empty_input_never_registers() {
        for digits in [None, Some("")] {
            let registrar = Arc::new(MockRegistrar::new());
            let result = handler(registrar.clone())
                .handle(command(1, digits))
                .await
                .unwrap();

            assert_eq!(result.classification, InputClassification::Empty);
            assert_eq!(result.verbs.len(), 1);
            assert!(registrar.calls().is_empty());
        }
    }

    #[tokio::test]
    async fn invalid_first_attempt_retries_without_registering() {
        let registrar = Arc::new(MockRegistrar::new());
        let result = handler(registrar.clone())
            .handle(command(1, Some("7")))
            .await
            .unwrap();

        assert_eq!(result.verbs.collect_count(), 1);
        assert!(matches!(
            &result.verbs.verbs()[1],
            Verb::Collect { callback_url, .. } if callback_url.contains("attempt=2")
        ));
        assert!(!result.opt_out_registered);
        assert!(registrar.calls().is_empty());
    }

    #[tokio::test]
    async fn invalid_final_attempt_ends_without_registering() {
        let registrar = Arc::new(MockRegistrar::new());
        let result = handler(registrar.clone())
            .handle(command(2, Some("7")))
            .await
            .unwrap();

        assert!(result.verbs.ends_flow());
        assert_eq!(result.verbs.len(), 1);
        assert!(registrar.calls().is_empty());
    }

    #[tokio::test]
    async fn registration_failure_surfaces_as_error() {
        let registrar = Arc::new(MockRegistrar::failing());
        let result = handler(registrar.clone()).handle(command(1, Some("1"))).await;

        assert!(matches!(
            result,
            Err(VoiceFlowError::OptOutRegistrationFailed(_))
        ));
        assert_eq!(registrar.calls().len(), 1);
    }

    #[tokio::test]
    async fn collected_tones_field_is_honoured() {
        let registrar = Arc::new(MockRegistrar::new());
        let mut cmd = command(1, Some("7"));
        cmd.input.collected_tones = Some(CollectedValue::from("1"));

        let result = handler(registrar.clone()).handle(cmd).await.unwrap();

        assert_eq!(result.classification, InputClassification::OptOutCode);
        assert_eq!(registrar.calls().len(), 1);
    }

    #[tokio::test]
    async fn numeric_one_is_not_an_opt_out() {
        let registrar = Arc::new(MockRegistrar::new());
        let mut cmd = command(1, None);
        cmd.input.digits = Some(CollectedValue::NonText("1".to_string()));

        let result = handler(registrar.clone()).handle(cmd).await.unwrap();

        assert_eq!(result.classification, InputClassification::OtherInput);
        assert_eq!(result.verbs.collect_count(), 1);
        assert!(registrar.calls().is_empty());
    }
}
