//! Audit log port - diagnostic record of webhook traffic.
//!
//! Each voice request and the response it produced is recorded so operators
//! can see what the platform sent. The log is diagnostic, not authoritative:
//! recording never fails from the caller's point of view, and concurrent
//! writers may interleave.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::foundation::Timestamp;

/// Port for the request audit log.
#[async_trait]
pub trait AuditLog: Send + Sync {
    /// Append a record. Fire-and-forget: failures are swallowed by the adapter.
    async fn record(&self, record: AuditRecord);

    /// All retained entries, newest first.
    async fn list(&self) -> Vec<AuditEntry>;

    /// Drop every entry.
    async fn clear(&self);
}

/// Request headers worth keeping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditHeaders {
    #[serde(rename = "user-agent", default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(rename = "content-type", default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(rename = "x-forwarded-for", default, skip_serializing_if = "Option::is_none")]
    pub x_forwarded_for: Option<String>,
}

/// What a caller hands to [`AuditLog::record`].
#[derive(Debug, Clone, PartialEq)]
pub struct AuditRecord {
    pub endpoint: String,
    pub method: String,
    pub body: serde_json::Value,
    pub query: BTreeMap<String, String>,
    pub headers: AuditHeaders,
    pub response: serde_json::Value,
}

/// A stored audit entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: Uuid,
    pub timestamp: Timestamp,
    pub endpoint: String,
    pub method: String,
    pub body: serde_json::Value,
    pub query: BTreeMap<String, String>,
    pub headers: AuditHeaders,
    pub response: serde_json::Value,
}

impl AuditEntry {
    /// Stamps a record with a fresh id and the current time.
    pub fn from_record(record: AuditRecord) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Timestamp::now(),
            endpoint: record.endpoint,
            method: record.method,
            body: record.body,
            query: record.query,
            headers: record.headers,
            response: record.response,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // Compile-time check that trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn AuditLog) {}

    #[test]
    fn headers_use_wire_names_and_skip_missing() {
        let headers = AuditHeaders {
            user_agent: Some("platform/1.0".to_string()),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&headers).unwrap(),
            json!({"user-agent": "platform/1.0"})
        );
    }

    #[test]
    fn entry_keeps_record_fields() {
        let record = AuditRecord {
            endpoint: "/api/voice/hooks/collect/opt-out".to_string(),
            method: "POST".to_string(),
            body: json!({"digits": "1"}),
            query: BTreeMap::from([("attempt".to_string(), "1".to_string())]),
            headers: AuditHeaders::default(),
            response: json!({"verbs": []}),
        };

        let entry = AuditEntry::from_record(record.clone());

        assert_eq!(entry.endpoint, record.endpoint);
        assert_eq!(entry.query.get("attempt"), Some(&"1".to_string()));
        assert_eq!(entry.response, json!({"verbs": []}));
    }
}
