//! Route configuration for monitor endpoints.

use axum::routing::get;
use axum::Router;

use super::handlers::{clear_audit_logs, list_audit_logs, MonitorAppState};
use crate::adapters::http::error::method_not_allowed;

/// Creates the monitor router.
///
/// Routes:
/// - `GET /monitor/logs` - List audit entries
/// - `DELETE /monitor/logs` - Clear audit entries
pub fn monitor_router() -> Router<MonitorAppState> {
    Router::new().route(
        "/monitor/logs",
        get(list_audit_logs)
            .delete(clear_audit_logs)
            .fallback(method_not_allowed),
    )
}
