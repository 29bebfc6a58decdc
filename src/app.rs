//! Wiring from configuration to a ready-to-serve router.

use std::sync::Arc;

use axum::Router;

use crate::adapters::audit::InMemoryAuditLog;
use crate::adapters::ciam::{CiamClientConfig, HttpOptOutRegistrar, LoggingOptOutRegistrar};
use crate::adapters::http::{app_router, MonitorAppState, VoiceAppState};
use crate::config::{AppConfig, CiamConfig, Environment};
use crate::domain::voice::{VerbSequenceBuilder, WebhookSignatureVerifier};
use crate::ports::{AuditLog, OptOutError, OptOutRegistrar};

/// Picks the opt-out registrar for the configured environment.
///
/// Without a base URL the opt-out is only logged, except in production,
/// where an unregistered opt-out would be silently lost.
pub fn registrar_from_config(
    ciam: &CiamConfig,
    environment: &Environment,
) -> Result<Arc<dyn OptOutRegistrar>, OptOutError> {
    let Some(base_url) = ciam.base_url.as_deref().filter(|_| ciam.is_configured()) else {
        if environment.is_production() {
            return Err(OptOutError::not_configured(
                "CIAM__BASE_URL is required in production",
            ));
        }
        tracing::warn!("No opt-out registration endpoint configured; opt-outs will only be logged");
        return Ok(Arc::new(LoggingOptOutRegistrar::new()));
    };

    let mut client_config = CiamClientConfig::new(base_url)
        .with_opt_out_path(ciam.opt_out_path.clone())
        .with_timeout(ciam.timeout());
    if let Some(api_key) = &ciam.api_key {
        client_config = client_config.with_api_key(api_key.clone());
    }

    tracing::info!(url = %client_config.opt_out_url(), "Opt-out registration endpoint configured");
    Ok(Arc::new(HttpOptOutRegistrar::new(client_config)?))
}

/// Builds the application router from validated configuration.
///
/// The registrar and audit log are passed in so callers can substitute
/// their own implementations.
pub fn build_router(
    config: &AppConfig,
    registrar: Arc<dyn OptOutRegistrar>,
    audit_log: Arc<dyn AuditLog>,
) -> Router {
    let builder = Arc::new(VerbSequenceBuilder::new(
        config.telephony.prompt_set(),
        config.telephony.flow_settings(),
    ));

    let mut voice = VoiceAppState::new(builder, registrar);
    let mut monitor = None;
    if config.audit.enabled {
        voice = voice.with_audit_log(audit_log.clone());
        monitor = Some(MonitorAppState::new(audit_log));
    }

    if let Some(secret) = &config.webhook.signing_secret {
        let verifier = WebhookSignatureVerifier::new(secret.clone())
            .with_tolerance_secs(config.webhook.tolerance_secs);
        voice = voice.with_signature_verification(verifier, config.webhook.signature_header.clone());
        tracing::info!(
            header = %config.webhook.signature_header,
            "Webhook signature verification enabled"
        );
    }

    app_router(
        voice,
        monitor,
        &config.server,
        &config.telephony.collect_path,
    )
}

/// Default audit log sized from configuration.
pub fn audit_log_from_config(config: &AppConfig) -> Arc<dyn AuditLog> {
    Arc::new(InMemoryAuditLog::new(config.audit.capacity))
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::ports::OptOutErrorCode;

    #[test]
    fn unconfigured_ciam_falls_back_to_logging() {
        assert!(registrar_from_config(&CiamConfig::default(), &Environment::Development).is_ok());
    }

    #[test]
    fn unconfigured_ciam_is_refused_in_production() {
        let err = registrar_from_config(&CiamConfig::default(), &Environment::Production)
            .err()
            .unwrap();
        assert_eq!(err.code, OptOutErrorCode::NotConfigured);

        let blank = CiamConfig {
            base_url: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(registrar_from_config(&blank, &Environment::Production).is_err());
    }

    #[test]
    fn configured_ciam_builds_http_registrar() {
        let ciam = CiamConfig {
            base_url: Some("https://ciam.example.com".to_string()),
            ..Default::default()
        };
        assert!(registrar_from_config(&ciam, &Environment::Production).is_ok());
    }
}
