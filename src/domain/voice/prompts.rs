//! Named audio prompts and fixed flow parameters.

/// Audio files played at each point of the flow.
///
/// Vendors host prompts on different CDNs; the set is supplied from
/// configuration rather than hard-coded per vendor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSet {
    /// Greeting that asks the caller to press 1.
    pub initial: String,
    /// First invalid entry; the caller gets another try.
    pub invalid: String,
    /// Second invalid entry; the call ends.
    pub final_invalid: String,
    /// Nothing was entered.
    pub no_input: String,
    /// Opt-out registered.
    pub confirmation: String,
}

/// Parameters of the `Collect`/`Pause` verbs and the callback address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowSettings {
    /// Absolute URL of the collect webhook, without the attempt parameter.
    pub collect_url: String,
    pub max_digits: u32,
    pub submit_on_hash: bool,
    /// Pause after a `Collect`, giving the caller time to key in digits.
    pub pause_secs: u32,
    pub barge_in: bool,
}

impl FlowSettings {
    /// Callback URL for the given attempt, e.g. `.../collect/opt-out?attempt=2`.
    pub fn callback_url(&self, attempt: super::Attempt) -> String {
        let separator = if self.collect_url.contains('?') { '&' } else { '?' };
        format!(
            "{}{}{}={}",
            self.collect_url,
            separator,
            super::ATTEMPT_QUERY_PARAM,
            attempt
        )
    }
}
