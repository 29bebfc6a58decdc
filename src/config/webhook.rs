//! Inbound webhook signature configuration

use http::HeaderName;
use secrecy::SecretString;
use serde::Deserialize;

use super::error::ValidationError;

/// Signature verification settings for the collect webhook
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookConfig {
    /// Shared HMAC secret; verification is disabled when unset
    pub signing_secret: Option<SecretString>,

    /// Header carrying `t=<unix>,v1=<hex>`
    #[serde(default = "default_signature_header")]
    pub signature_header: String,

    /// Maximum signature age in seconds
    #[serde(default = "default_tolerance")]
    pub tolerance_secs: i64,
}

impl WebhookConfig {
    pub fn is_signature_required(&self) -> bool {
        self.signing_secret.is_some()
    }

    /// Validate webhook configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        HeaderName::from_bytes(self.signature_header.as_bytes())
            .map_err(|_| ValidationError::InvalidHeaderName(self.signature_header.clone()))?;
        if self.tolerance_secs <= 0 {
            return Err(ValidationError::OutOfRange {
                field: "WEBHOOK__TOLERANCE_SECS",
                min: 1,
                max: i64::MAX as u64,
            });
        }
        Ok(())
    }
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            signing_secret: None,
            signature_header: default_signature_header(),
            tolerance_secs: default_tolerance(),
        }
    }
}

fn default_signature_header() -> String {
    "X-Webhook-Signature".to_string()
}

fn default_tolerance() -> i64 {
    crate::domain::voice::DEFAULT_TOLERANCE_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_webhook_defaults() {
        let config = WebhookConfig::default();
        assert!(!config.is_signature_required());
        assert_eq!(config.signature_header, "X-Webhook-Signature");
        assert_eq!(config.tolerance_secs, 300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_header_name() {
        let config = WebhookConfig {
            signature_header: "bad header".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidHeaderName(_))
        ));
    }

    #[test]
    fn test_non_positive_tolerance() {
        let config = WebhookConfig {
            tolerance_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
