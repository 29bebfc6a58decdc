//! Data Transfer Objects for the voice webhook endpoints.
//!
//! These types define the exact JSON the telephony platform sends and
//! expects back. Field names are part of the vendor contract.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::application::handlers::voice::HandleCollectCommand;
use crate::domain::voice::{
    Attempt, CallerMetadata, CollectedInput, CollectedValue, Verb, VerbSequence,
};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of a collect webhook.
///
/// Unknown fields are ignored. An absent body is treated as `{}`. Digit
/// fields accept any JSON value; only strings can carry the opt-out code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectWebhookRequest {
    #[serde(default, deserialize_with = "collected_value")]
    pub digits: Option<CollectedValue>,
    #[serde(default, deserialize_with = "collected_value")]
    pub collected_tones: Option<CollectedValue>,
    #[serde(flatten)]
    pub caller: CallerMetadata,
}

impl CollectWebhookRequest {
    pub fn into_command(self, attempt: Attempt) -> HandleCollectCommand {
        HandleCollectCommand {
            attempt,
            input: CollectedInput {
                collected_tones: self.collected_tones,
                digits: self.digits,
            },
            caller: self.caller,
        }
    }
}

fn collected_value<'de, D>(deserializer: D) -> Result<Option<CollectedValue>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(CollectedValue::Text(text)),
        Some(other) => Some(CollectedValue::NonText(other.to_string())),
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// One verb as the platform reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum VerbResponse {
    Play {
        #[serde(rename = "fileURL")]
        file_url: String,
        #[serde(rename = "bargeIn")]
        barge_in: bool,
    },
    Collect {
        #[serde(rename = "eventUrl")]
        event_url: String,
        #[serde(rename = "submitOnHash")]
        submit_on_hash: bool,
        #[serde(rename = "maxDigits")]
        max_digits: u32,
    },
    Pause {
        duration: u32,
    },
}

impl From<&Verb> for VerbResponse {
    fn from(verb: &Verb) -> Self {
        match verb {
            Verb::Play {
                audio_url,
                allow_barge_in,
            } => VerbResponse::Play {
                file_url: audio_url.clone(),
                barge_in: *allow_barge_in,
            },
            Verb::Collect {
                callback_url,
                max_digits,
                terminate_on_hash,
            } => VerbResponse::Collect {
                event_url: callback_url.clone(),
                submit_on_hash: *terminate_on_hash,
                max_digits: *max_digits,
            },
            Verb::Pause { duration_secs } => VerbResponse::Pause {
                duration: *duration_secs,
            },
        }
    }
}

/// Response body for every voice endpoint that returns instructions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DialplanResponse {
    pub verbs: Vec<VerbResponse>,
}

impl From<&VerbSequence> for DialplanResponse {
    fn from(sequence: &VerbSequence) -> Self {
        Self {
            verbs: sequence.iter().map(VerbResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_serializes_with_vendor_field_names() {
        let verb = VerbResponse::from(&Verb::Play {
            audio_url: "https://cdn.example.com/5.wav".to_string(),
            allow_barge_in: false,
        });

        assert_eq!(
            serde_json::to_string(&verb).unwrap(),
            r#"{"type":"PLAY","fileURL":"https://cdn.example.com/5.wav","bargeIn":false}"#
        );
    }

    #[test]
    fn collect_serializes_with_vendor_field_names() {
        let verb = VerbResponse::from(&Verb::Collect {
            callback_url: "https://ivr.example.com/collect?attempt=2".to_string(),
            max_digits: 30,
            terminate_on_hash: true,
        });

        assert_eq!(
            serde_json::to_string(&verb).unwrap(),
            r#"{"type":"COLLECT","eventUrl":"https://ivr.example.com/collect?attempt=2","submitOnHash":true,"maxDigits":30}"#
        );
    }

    #[test]
    fn pause_serializes_duration() {
        let verb = VerbResponse::from(&Verb::Pause { duration_secs: 7 });

        assert_eq!(
            serde_json::to_string(&verb).unwrap(),
            r#"{"type":"PAUSE","duration":7}"#
        );
    }

    #[test]
    fn dialplan_preserves_verb_order() {
        let sequence = VerbSequence::new(vec![
            Verb::Play {
                audio_url: "a".to_string(),
                allow_barge_in: false,
            },
            Verb::Pause { duration_secs: 3 },
        ]);

        let json = serde_json::to_value(DialplanResponse::from(&sequence)).unwrap();

        assert_eq!(json["verbs"][0]["type"], "PLAY");
        assert_eq!(json["verbs"][1]["type"], "PAUSE");
        assert_eq!(json["verbs"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn request_accepts_either_digit_field_and_caller_ids() {
        let req: CollectWebhookRequest = serde_json::from_str(
            r#"{"collectedTones":"1","digits":"9","messageId":"m-1","phoneNumber":"+15550100","extra":true}"#,
        )
        .unwrap();

        assert_eq!(req.collected_tones, Some(CollectedValue::from("1")));
        assert_eq!(req.digits, Some(CollectedValue::from("9")));
        assert_eq!(req.caller.message_id.as_deref(), Some("m-1"));
        assert_eq!(req.caller.phone_number.as_deref(), Some("+15550100"));
    }

    #[test]
    fn request_tolerates_nulls_and_empty_object() {
        let req: CollectWebhookRequest =
            serde_json::from_str(r#"{"digits":null,"collectedTones":null}"#).unwrap();
        assert_eq!(req, CollectWebhookRequest::default());

        let req: CollectWebhookRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req, CollectWebhookRequest::default());
    }

    #[test]
    fn request_keeps_non_string_digits_as_json_text() {
        let req: CollectWebhookRequest =
            serde_json::from_str(r#"{"digits":7,"collectedTones":true}"#).unwrap();
        assert_eq!(req.digits, Some(CollectedValue::NonText("7".to_string())));
        assert_eq!(
            req.collected_tones,
            Some(CollectedValue::NonText("true".to_string()))
        );

        let req: CollectWebhookRequest = serde_json::from_str(r#"{"digits":1}"#).unwrap();
        assert_eq!(req.digits, Some(CollectedValue::NonText("1".to_string())));
    }

    #[test]
    fn into_command_carries_input_and_attempt() {
        let req = CollectWebhookRequest {
            digits: Some(CollectedValue::from("1")),
            ..Default::default()
        };

        let cmd = req.into_command(Attempt::new(2));

        assert_eq!(cmd.attempt.value(), 2);
        assert_eq!(cmd.input.into_raw(), Some(CollectedValue::from("1")));
    }
}
