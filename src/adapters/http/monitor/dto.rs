//! Response shapes for the monitor endpoints.

use serde::Serialize;

use crate::ports::AuditEntry;

/// Retained audit entries, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct AuditLogListResponse {
    pub count: usize,
    pub logs: Vec<AuditEntry>,
}

impl From<Vec<AuditEntry>> for AuditLogListResponse {
    fn from(logs: Vec<AuditEntry>) -> Self {
        Self {
            count: logs.len(),
            logs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
