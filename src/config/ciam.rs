//! Opt-out registration service configuration

use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

use super::error::{check_range, check_url, ValidationError};
use super::server::Environment;

/// Configuration of the identity service that records opt-outs
#[derive(Debug, Clone, Deserialize)]
pub struct CiamConfig {
    /// Base URL of the service; opt-outs are only logged when unset
    pub base_url: Option<String>,

    /// Bearer token sent with each registration
    pub api_key: Option<SecretString>,

    /// Path of the opt-out endpoint
    #[serde(default = "default_opt_out_path")]
    pub opt_out_path: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl CiamConfig {
    /// Whether a real registration endpoint is configured
    pub fn is_configured(&self) -> bool {
        self.base_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate registration service configuration
    ///
    /// Production refuses to start without a registration endpoint, so
    /// opt-outs are never silently dropped.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let production = environment.is_production();

        match self.base_url.as_deref() {
            Some(url) if !url.trim().is_empty() => check_url("CIAM__BASE_URL", url, production)?,
            _ if production => return Err(ValidationError::MissingRequired("CIAM__BASE_URL")),
            _ => {}
        }
        if !self.opt_out_path.starts_with('/') {
            return Err(ValidationError::InvalidPath("CIAM__OPT_OUT_PATH"));
        }
        check_range("CIAM__TIMEOUT_SECS", self.timeout_secs, 1, 120)
    }
}

impl Default for CiamConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            opt_out_path: default_opt_out_path(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_opt_out_path() -> String {
    crate::adapters::ciam::DEFAULT_OPT_OUT_PATH.to_string()
}

fn default_timeout() -> u64 {
    10
}
