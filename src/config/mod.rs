//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `OPTOUT_IVR` prefix and nested values use double underscores as separators.
//!
//! Every section has defaults, so an empty environment yields a runnable
//! development configuration.
//!
//! # Example
//!
//! ```no_run
//! use optout_ivr::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod audit;
mod ciam;
mod error;
mod server;
mod telephony;
mod webhook;

pub use audit::AuditConfig;
pub use ciam::CiamConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use telephony::{PromptConfig, TelephonyConfig};
pub use webhook::WebhookConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Telephony flow (callback URL, collect parameters, prompts)
    #[serde(default)]
    pub telephony: TelephonyConfig,

    /// Opt-out registration service
    #[serde(default)]
    pub ciam: CiamConfig,

    /// Inbound webhook signature verification
    #[serde(default)]
    pub webhook: WebhookConfig,

    /// Request audit log
    #[serde(default)]
    pub audit: AuditConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `OPTOUT_IVR` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `OPTOUT_IVR__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `OPTOUT_IVR__TELEPHONY__PROMPTS__NO_INPUT=...` -> `telephony.prompts.no_input = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("OPTOUT_IVR")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Performs semantic validation of configuration:
    /// - URL formats
    /// - Numeric ranges
    /// - Production-specific requirements (HTTPS, registration endpoint)
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.telephony.validate(&self.server.environment)?;
        self.ciam.validate(&self.server.environment)?;
        self.webhook.validate()?;
        self.audit.validate()?;

        // The timeout layer would otherwise cut registration short with a
        // bare 408 instead of the error body.
        if self.ciam.is_configured() && self.ciam.timeout() >= self.server.request_timeout() {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
