//! Verb sequence builder - the decision table of the opt-out flow.
//!
//! | attempt | classification | verbs                                        |
//! |---------|----------------|----------------------------------------------|
//! | any     | Empty          | `Play(no_input)`                             |
//! | any     | OptOutCode     | `Play(confirmation)`                         |
//! | 1       | OtherInput     | `Play(invalid)`, `Collect(attempt=2)`, `Pause` |
//! | >= 2    | OtherInput     | `Play(final_invalid)`                        |
//!
//! The `Collect` verb points back at the collect webhook with the next
//! attempt number in its URL, which is how the attempt survives between
//! requests without a session store.
//!
//! Building is pure: no I/O, no clock, same inputs give the same sequence.

use super::attempt::Attempt;
use super::classification::InputClassification;
use super::prompts::{FlowSettings, PromptSet};
use super::verb::{Verb, VerbSequence};

/// Maps (attempt, classification) to the verbs returned to the platform.
#[derive(Debug, Clone)]
pub struct VerbSequenceBuilder {
    prompts: PromptSet,
    settings: FlowSettings,
}

impl VerbSequenceBuilder {
    pub fn new(prompts: PromptSet, settings: FlowSettings) -> Self {
        Self { prompts, settings }
    }

    pub fn prompts(&self) -> &PromptSet {
        &self.prompts
    }

    pub fn settings(&self) -> &FlowSettings {
        &self.settings
    }

    /// Verbs for one collect webhook round.
    pub fn build(&self, attempt: Attempt, classification: InputClassification) -> VerbSequence {
        match classification {
            InputClassification::Empty => self.play_only(&self.prompts.no_input),
            InputClassification::OptOutCode => self.play_only(&self.prompts.confirmation),
            InputClassification::OtherInput if attempt.is_final() => {
                self.play_only(&self.prompts.final_invalid)
            }
            InputClassification::OtherInput => {
                self.prompt_and_collect(&self.prompts.invalid, attempt.next())
            }
        }
    }

    /// Verbs that open the flow: greeting, then the first collect round.
    pub fn initial(&self) -> VerbSequence {
        self.prompt_and_collect(&self.prompts.initial, Attempt::FIRST)
    }

    fn play_only(&self, audio_url: &str) -> VerbSequence {
        VerbSequence::new(vec![self.play(audio_url)])
    }

    fn prompt_and_collect(&self, audio_url: &str, callback_attempt: Attempt) -> VerbSequence {
        VerbSequence::new(vec![
            self.play(audio_url),
            Verb::Collect {
                callback_url: self.settings.callback_url(callback_attempt),
                max_digits: self.settings.max_digits,
                terminate_on_hash: self.settings.submit_on_hash,
            },
            Verb::Pause {
                duration_secs: self.settings.pause_secs,
            },
        ])
    }

    fn play(&self, audio_url: &str) -> Verb {
        Verb::Play {
            audio_url: audio_url.to_string(),
            allow_barge_in: self.settings.barge_in,
        }
    }
}
