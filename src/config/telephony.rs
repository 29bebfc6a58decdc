//! Telephony flow configuration

use serde::Deserialize;

use super::error::{check_range, check_url, ValidationError};
use super::server::Environment;
use crate::adapters::http::{DEFAULT_COLLECT_PATH, INITIAL_DIALPLAN_PATH};
use crate::domain::voice::{FlowSettings, PromptSet};

/// Paths served by other routes; the collect webhook cannot take them.
const RESERVED_PATHS: [&str; 3] = [INITIAL_DIALPLAN_PATH, "/api/monitor/logs", "/health"];

/// Telephony configuration: callback address, collect parameters, prompts
#[derive(Debug, Clone, Deserialize)]
pub struct TelephonyConfig {
    /// Externally reachable base URL of this service
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    /// Path of the collect webhook. The route is mounted here and the same
    /// path is appended to `public_base_url` in every collect verb, so a
    /// proxy prefix belongs in the base URL, not here.
    #[serde(default = "default_collect_path")]
    pub collect_path: String,

    /// Maximum digits gathered per collect round
    #[serde(default = "default_max_digits")]
    pub max_digits: u32,

    /// Whether `#` ends digit entry
    #[serde(default = "default_submit_on_hash")]
    pub submit_on_hash: bool,

    /// Pause after a collect verb, in seconds
    #[serde(default = "default_retry_pause")]
    pub retry_pause_secs: u32,

    /// Whether callers may interrupt prompts
    #[serde(default)]
    pub barge_in: bool,

    /// Audio prompt URLs
    #[serde(default)]
    pub prompts: PromptConfig,
}

/// Audio prompt URLs
#[derive(Debug, Clone, Deserialize)]
pub struct PromptConfig {
    #[serde(default = "default_initial_prompt")]
    pub initial: String,

    #[serde(default = "default_invalid_prompt")]
    pub invalid: String,

    #[serde(default = "default_final_invalid_prompt")]
    pub final_invalid: String,

    #[serde(default = "default_no_input_prompt")]
    pub no_input: String,

    #[serde(default = "default_confirmation_prompt")]
    pub confirmation: String,
}

impl TelephonyConfig {
    /// Absolute collect webhook URL, without the attempt parameter
    pub fn collect_url(&self) -> String {
        format!(
            "{}{}",
            self.public_base_url.trim_end_matches('/'),
            self.collect_path
        )
    }

    pub fn flow_settings(&self) -> FlowSettings {
        FlowSettings {
            collect_url: self.collect_url(),
            max_digits: self.max_digits,
            submit_on_hash: self.submit_on_hash,
            pause_secs: self.retry_pause_secs,
            barge_in: self.barge_in,
        }
    }

    pub fn prompt_set(&self) -> PromptSet {
        PromptSet {
            initial: self.prompts.initial.clone(),
            invalid: self.prompts.invalid.clone(),
            final_invalid: self.prompts.final_invalid.clone(),
            no_input: self.prompts.no_input.clone(),
            confirmation: self.prompts.confirmation.clone(),
        }
    }

    /// Validate telephony configuration
    ///
    /// In production the public base URL must use HTTPS, since the platform
    /// calls it back with caller identifiers.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let production = environment.is_production();

        check_url("TELEPHONY__PUBLIC_BASE_URL", &self.public_base_url, production)?;
        validate_collect_path(&self.collect_path)?;
        check_range("TELEPHONY__MAX_DIGITS", self.max_digits.into(), 1, 64)?;
        check_range("TELEPHONY__RETRY_PAUSE_SECS", self.retry_pause_secs.into(), 1, 60)?;
        self.prompts.validate()
    }
}

/// A literal route path: no captures, wildcards or query, and no clash with
/// the other mounted routes.
fn validate_collect_path(path: &str) -> Result<(), ValidationError> {
    let literal = path.starts_with('/')
        && path
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '-' | '_' | '.' | '~'));
    if !literal || RESERVED_PATHS.contains(&path) {
        return Err(ValidationError::InvalidPath("TELEPHONY__COLLECT_PATH"));
    }
    Ok(())
}

impl PromptConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        check_url("TELEPHONY__PROMPTS__INITIAL", &self.initial, false)?;
        check_url("TELEPHONY__PROMPTS__INVALID", &self.invalid, false)?;
        check_url("TELEPHONY__PROMPTS__FINAL_INVALID", &self.final_invalid, false)?;
        check_url("TELEPHONY__PROMPTS__NO_INPUT", &self.no_input, false)?;
        check_url("TELEPHONY__PROMPTS__CONFIRMATION", &self.confirmation, false)
    }
}

impl Default for TelephonyConfig {
    fn default() -> Self {
        Self {
            public_base_url: default_public_base_url(),
            collect_path: default_collect_path(),
            max_digits: default_max_digits(),
            submit_on_hash: default_submit_on_hash(),
            retry_pause_secs: default_retry_pause(),
            barge_in: false,
            prompts: PromptConfig::default(),
        }
    }
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            initial: default_initial_prompt(),
            invalid: default_invalid_prompt(),
            final_invalid: default_final_invalid_prompt(),
            no_input: default_no_input_prompt(),
            confirmation: default_confirmation_prompt(),
        }
    }
}

fn default_public_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_collect_path() -> String {
    DEFAULT_COLLECT_PATH.to_string()
}

fn default_max_digits() -> u32 {
    30
}

fn default_submit_on_hash() -> bool {
    true
}

fn default_retry_pause() -> u32 {
    7
}

fn default_initial_prompt() -> String {
    "https://cdn12.waymore.io/s/pTXaaw7KDLcjBnt/download/1.wav".to_string()
}

fn default_invalid_prompt() -> String {
    "https://cdn12.waymore.io/s/ezLYj4bpG6mmBty/download/2.wav".to_string()
}

fn default_final_invalid_prompt() -> String {
    "https://cdn12.waymore.io/s/Z78YoYbRwjMMZBk/download/3.wav".to_string()
}

fn default_no_input_prompt() -> String {
    "https://cdn12.waymore.io/s/299WXiedo2wCp2y/download/4.wav".to_string()
}

fn default_confirmation_prompt() -> String {
    "https://cdn12.waymore.io/s/Aw9oidNF2oxAppq/download/5.wav".to_string()
}
