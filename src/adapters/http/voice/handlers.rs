//! HTTP handlers for the voice webhook endpoints.
//!
//! These handlers connect Axum routes to the voice command/query handlers.
//! Every request, successful or not, is written to the audit log together
//! with the response it produced.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{OriginalUri, Query, State};
use axum::http::{header, HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::adapters::http::error::ApiError;
use crate::application::handlers::voice::{
    GetInitialDialplanHandler, GetInitialDialplanQuery, HandleCollectHandler,
};
use crate::domain::foundation::Timestamp;
use crate::domain::voice::{
    Attempt, VerbSequenceBuilder, VoiceFlowError, WebhookSignatureVerifier, ATTEMPT_QUERY_PARAM,
};
use crate::ports::{AuditHeaders, AuditLog, AuditRecord, OptOutRegistrar};

use super::dto::{CollectWebhookRequest, DialplanResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the voice endpoints.
///
/// Cloned per request; every dependency is behind an `Arc`.
#[derive(Clone)]
pub struct VoiceAppState {
    pub builder: Arc<VerbSequenceBuilder>,
    pub opt_out_registrar: Arc<dyn OptOutRegistrar>,
    pub audit_log: Option<Arc<dyn AuditLog>>,
    pub signature_check: Option<SignatureCheck>,
}

impl VoiceAppState {
    pub fn new(builder: Arc<VerbSequenceBuilder>, opt_out_registrar: Arc<dyn OptOutRegistrar>) -> Self {
        Self {
            builder,
            opt_out_registrar,
            audit_log: None,
            signature_check: None,
        }
    }

    pub fn with_audit_log(mut self, audit_log: Arc<dyn AuditLog>) -> Self {
        self.audit_log = Some(audit_log);
        self
    }

    /// Require a valid signature on every collect webhook.
    pub fn with_signature_verification(
        mut self,
        verifier: WebhookSignatureVerifier,
        header_name: impl Into<String>,
    ) -> Self {
        self.signature_check = Some(SignatureCheck {
            verifier: Arc::new(verifier),
            header_name: header_name.into(),
        });
        self
    }

    pub fn collect_handler(&self) -> HandleCollectHandler {
        HandleCollectHandler::new(self.builder.clone(), self.opt_out_registrar.clone())
    }

    pub fn initial_dialplan_handler(&self) -> GetInitialDialplanHandler {
        GetInitialDialplanHandler::new(self.builder.clone())
    }

    async fn audit(&self, exchange: Exchange<'_>) {
        let Some(audit_log) = &self.audit_log else {
            return;
        };

        let record = AuditRecord {
            endpoint: exchange.path.to_string(),
            method: exchange.method.to_string(),
            body: body_as_json(exchange.body),
            query: exchange.query,
            headers: audit_headers(exchange.headers),
            response: exchange.response.clone(),
        };
        audit_log.record(record).await;
    }
}

/// Signature verification settings for inbound webhooks.
#[derive(Clone)]
pub struct SignatureCheck {
    pub verifier: Arc<WebhookSignatureVerifier>,
    pub header_name: String,
}

impl SignatureCheck {
    fn verify(&self, headers: &HeaderMap, body: &[u8]) -> Result<(), VoiceFlowError> {
        let value = headers
            .get(self.header_name.as_str())
            .ok_or(VoiceFlowError::MissingSignature)?
            .to_str()
            .map_err(|_| VoiceFlowError::invalid_signature("header is not visible ASCII"))?;

        self.verifier.verify(body, value, Timestamp::now())
    }
}

/// One request/response pair headed for the audit log.
struct Exchange<'a> {
    path: &'a str,
    method: &'a Method,
    headers: &'a HeaderMap,
    body: &'a [u8],
    query: BTreeMap<String, String>,
    response: &'a serde_json::Value,
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/voice/hooks/collect/opt-out?attempt=N - Decide the next verbs.
///
/// Signature verification (when enabled) runs before anything else. A
/// missing or malformed `attempt` is treated as the first attempt.
pub async fn handle_collect_webhook(
    State(state): State<VoiceAppState>,
    OriginalUri(uri): OriginalUri,
    query: Option<Query<BTreeMap<String, String>>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let query = query.map(|Query(query)| query).unwrap_or_default();

    let (status, payload) = match run_collect(&state, &query, &headers, &body).await {
        Ok(payload) => (StatusCode::OK, payload),
        Err(err) => ApiError::from(err).into_parts(),
    };

    state
        .audit(Exchange {
            path: uri.path(),
            method: &Method::POST,
            headers: &headers,
            body: &body,
            query,
            response: &payload,
        })
        .await;

    (status, Json(payload)).into_response()
}

/// GET|POST /api/voice/dialplans/opt-out/initial - Opening dialplan.
pub async fn get_initial_dialplan(
    State(state): State<VoiceAppState>,
    OriginalUri(uri): OriginalUri,
    method: Method,
    query: Option<Query<BTreeMap<String, String>>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let query = query.map(|Query(query)| query).unwrap_or_default();

    let verbs = state
        .initial_dialplan_handler()
        .handle(GetInitialDialplanQuery);
    let (status, payload) = match to_json(&DialplanResponse::from(&verbs)) {
        Ok(payload) => (StatusCode::OK, payload),
        Err(err) => ApiError::from(err).into_parts(),
    };

    state
        .audit(Exchange {
            path: uri.path(),
            method: &method,
            headers: &headers,
            body: &body,
            query,
            response: &payload,
        })
        .await;

    (status, Json(payload)).into_response()
}

async fn run_collect(
    state: &VoiceAppState,
    query: &BTreeMap<String, String>,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<serde_json::Value, VoiceFlowError> {
    if let Some(check) = &state.signature_check {
        check.verify(headers, body)?;
    }

    let request = parse_collect_body(body)?;
    let attempt = Attempt::from_query(query.get(ATTEMPT_QUERY_PARAM).map(String::as_str));

    let result = state
        .collect_handler()
        .handle(request.into_command(attempt))
        .await?;

    to_json(&DialplanResponse::from(&result.verbs))
}

// ════════════════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════════════════

/// An empty body reads as `{}`; anything else must be a JSON object.
fn parse_collect_body(body: &[u8]) -> Result<CollectWebhookRequest, VoiceFlowError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(CollectWebhookRequest::default());
    }
    serde_json::from_slice(body).map_err(|e| VoiceFlowError::invalid_payload(e.to_string()))
}

fn to_json<T: Serialize>(value: &T) -> Result<serde_json::Value, VoiceFlowError> {
    serde_json::to_value(value).map_err(|e| VoiceFlowError::internal(e.to_string()))
}

fn body_as_json(body: &[u8]) -> serde_json::Value {
    serde_json::from_slice(body).unwrap_or_else(|_| serde_json::json!({}))
}

fn audit_headers(headers: &HeaderMap) -> AuditHeaders {
    let text = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    };

    AuditHeaders {
        user_agent: text(header::USER_AGENT.as_str()),
        content_type: text(header::CONTENT_TYPE.as_str()),
        x_forwarded_for: text("x-forwarded-for"),
    }
}
