//! Per-request call context.

use serde::{Deserialize, Serialize};

use super::attempt::Attempt;
use super::classification::InputClassification;

/// Vendor-supplied identifiers for the call.
///
/// Opaque to the decision engine: never used for branching, only passed
/// through to opt-out registration unmodified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallerMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_tracking_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

impl CallerMetadata {
    /// Key that identifies this call to the registration service, if any.
    ///
    /// Prefers the message id, falling back to the conversation tracking id.
    pub fn idempotency_key(&self) -> Option<&str> {
        [&self.message_id, &self.conversation_tracking_id]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|key| !key.is_empty())
    }
}

/// One collected field, as the platform sent it.
///
/// Only a JSON string can match the opt-out digit; the match is literal, so
/// a numeric `1` is not an opt-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectedValue {
    Text(String),
    /// Any other JSON value, kept in its JSON text form (`7`, `true`).
    NonText(String),
}

impl CollectedValue {
    pub fn as_str(&self) -> &str {
        match self {
            CollectedValue::Text(value) | CollectedValue::NonText(value) => value,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            CollectedValue::Text(value) | CollectedValue::NonText(value) => value,
        }
    }

    pub fn classify(&self) -> InputClassification {
        match self {
            CollectedValue::Text(value) => InputClassification::classify(Some(value)),
            CollectedValue::NonText(_) => InputClassification::OtherInput,
        }
    }
}

impl From<String> for CollectedValue {
    fn from(value: String) -> Self {
        CollectedValue::Text(value)
    }
}

impl From<&str> for CollectedValue {
    fn from(value: &str) -> Self {
        CollectedValue::Text(value.to_string())
    }
}

/// Digits as reported under either vendor field name.
///
/// Vendors name the field `digits` or `collectedTones`. When both are
/// present `collectedTones` wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectedInput {
    pub collected_tones: Option<CollectedValue>,
    pub digits: Option<CollectedValue>,
}

impl CollectedInput {
    /// Normalizes to the single raw value the classifier sees.
    pub fn into_raw(self) -> Option<CollectedValue> {
        self.collected_tones.or(self.digits)
    }
}

/// Everything the engine knows about one webhook round.
///
/// Built fresh per request and dropped with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallAttemptContext {
    pub attempt: Attempt,
    pub raw_input: Option<CollectedValue>,
    pub caller: CallerMetadata,
}

impl CallAttemptContext {
    pub fn new(attempt: Attempt, input: CollectedInput, caller: CallerMetadata) -> Self {
        Self {
            attempt,
            raw_input: input.into_raw(),
            caller,
        }
    }

    pub fn classification(&self) -> InputClassification {
        match &self.raw_input {
            Some(value) => value.classify(),
            None => InputClassification::Empty,
        }
    }
}
