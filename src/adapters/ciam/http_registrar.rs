//! HTTP opt-out registrar for a CIAM-style consent service.
//!
//! Sends one `POST` per opt-out and maps the outcome onto [`OptOutError`].
//! No retries: a failed call is reported once and the caller decides.
//!
//! # Configuration
//!
//! ```ignore
//! let config = CiamClientConfig::new("https://ciam.example.com")
//!     .with_api_key(api_key)
//!     .with_timeout(Duration::from_secs(10));
//! let registrar = HttpOptOutRegistrar::new(config)?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};

use crate::ports::{OptOutError, OptOutRegistrar, OptOutRegistration};

/// Default path of the opt-out endpoint on the consent service.
pub const DEFAULT_OPT_OUT_PATH: &str = "/v1/opt-outs";

/// Connection settings for the consent service.
#[derive(Clone)]
pub struct CiamClientConfig {
    /// Base URL, e.g. `https://ciam.example.com`.
    base_url: String,

    /// Path of the opt-out endpoint.
    opt_out_path: String,

    /// Bearer token, if the service requires one.
    api_key: Option<SecretString>,

    /// Transport timeout for the whole request.
    timeout: Duration,
}

impl CiamClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            opt_out_path: DEFAULT_OPT_OUT_PATH.to_string(),
            api_key: None,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_opt_out_path(mut self, path: impl Into<String>) -> Self {
        self.opt_out_path = path.into();
        self
    }

    pub fn with_api_key(mut self, api_key: SecretString) -> Self {
        self.api_key = Some(api_key);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL of the opt-out endpoint.
    pub fn opt_out_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.opt_out_path.trim_start_matches('/')
        )
    }
}

/// Registers opt-outs over HTTP.
pub struct HttpOptOutRegistrar {
    config: CiamClientConfig,
    client: Client,
}

impl HttpOptOutRegistrar {
    /// Creates the registrar and its HTTP client.
    pub fn new(config: CiamClientConfig) -> Result<Self, OptOutError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| OptOutError::transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl OptOutRegistrar for HttpOptOutRegistrar {
    async fn register(&self, registration: OptOutRegistration) -> Result<(), OptOutError> {
        let url = self.config.opt_out_url();

        let mut request = self.client.post(&url).json(&registration);
        if let Some(api_key) = &self.config.api_key {
            request = request.bearer_auth(api_key.expose_secret());
        }
        if let Some(key) = registration.idempotency_key() {
            request = request.header("Idempotency-Key", key);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(url = %url, error = %e, "Opt-out request did not complete");
            OptOutError::transport(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(url = %url, status = status.as_u16(), "Opt-out accepted");
            return Ok(());
        }

        Err(rejection(status))
    }
}

fn rejection(status: StatusCode) -> OptOutError {
    let reason = status.canonical_reason().unwrap_or("unexpected status");
    OptOutError::rejected(status.as_u16(), reason)
}
