//! HTTP adapter exposing the audit log to operators.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{AuditLogListResponse, MessageResponse};
pub use handlers::{clear_audit_logs, list_audit_logs, MonitorAppState};
pub use routes::monitor_router;
