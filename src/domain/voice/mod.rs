//! Voice opt-out flow - the collection decision engine.
//!
//! A caller hears a prompt and presses a key. Each collect webhook is
//! classified and turned into the next verb sequence:
//!
//! ```text
//! query ──► Attempt ──┐
//!                     ├──► VerbSequenceBuilder::build ──► VerbSequence
//! body ──► InputClassification
//! ```
//!
//! Everything here is request-scoped and pure. The opt-out registration side
//! effect lives behind the `OptOutRegistrar` port and is driven by the
//! application layer.

mod attempt;
mod builder;
mod classification;
mod context;
mod errors;
mod prompts;
mod signature;
mod verb;

pub use attempt::{Attempt, ATTEMPT_QUERY_PARAM};
pub use builder::VerbSequenceBuilder;
pub use classification::{InputClassification, OPT_OUT_DIGIT};
pub use context::{CallAttemptContext, CallerMetadata, CollectedInput, CollectedValue};
pub use errors::VoiceFlowError;
pub use prompts::{FlowSettings, PromptSet};
pub use signature::{SignatureHeader, WebhookSignatureVerifier, DEFAULT_TOLERANCE_SECS};
pub use verb::{Verb, VerbSequence};

#[cfg(test)]
pub(crate) use builder::test_support;
