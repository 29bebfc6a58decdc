//! HTTP handlers for the audit log monitor.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::response::IntoResponse;

use crate::ports::AuditLog;

use super::dto::{AuditLogListResponse, MessageResponse};

/// Shared state for the monitor endpoints.
#[derive(Clone)]
pub struct MonitorAppState {
    pub audit_log: Arc<dyn AuditLog>,
}

impl MonitorAppState {
    pub fn new(audit_log: Arc<dyn AuditLog>) -> Self {
        Self { audit_log }
    }
}

/// GET /api/monitor/logs - List retained entries.
pub async fn list_audit_logs(State(state): State<MonitorAppState>) -> impl IntoResponse {
    let entries = state.audit_log.list().await;
    Json(AuditLogListResponse::from(entries))
}

/// DELETE /api/monitor/logs - Drop every entry.
pub async fn clear_audit_logs(State(state): State<MonitorAppState>) -> impl IntoResponse {
    state.audit_log.clear().await;
    tracing::info!("Audit log cleared");
    Json(MessageResponse::new("Logs cleared"))
}
