//! In-memory audit log.
//!
//! Bounded ring buffer: newest entry first, the oldest entry is dropped once
//! capacity is exceeded. Contents are lost on restart. Not shared between
//! server instances.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::ports::{AuditEntry, AuditLog, AuditRecord};

/// Default number of entries retained.
pub const DEFAULT_AUDIT_CAPACITY: usize = 100;

/// Bounded, concurrency-safe audit log held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryAuditLog {
    capacity: usize,
    entries: Arc<RwLock<VecDeque<AuditEntry>>>,
}

impl InMemoryAuditLog {
    /// Creates a log retaining at most `capacity` entries (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: Arc::new(RwLock::new(VecDeque::with_capacity(capacity))),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_AUDIT_CAPACITY)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for InMemoryAuditLog {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[async_trait]
impl AuditLog for InMemoryAuditLog {
    async fn record(&self, record: AuditRecord) {
        let entry = AuditEntry::from_record(record);
        let mut entries = self.entries.write().await;
        entries.push_front(entry);
        entries.truncate(self.capacity);
    }

    async fn list(&self) -> Vec<AuditEntry> {
        self.entries.read().await.iter().cloned().collect()
    }

    async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::AuditHeaders;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn record(n: usize) -> AuditRecord {
        AuditRecord {
            endpoint: "/api/voice/hooks/collect/opt-out".to_string(),
            method: "POST".to_string(),
            body: json!({ "digits": n.to_string() }),
            query: BTreeMap::new(),
            headers: AuditHeaders::default(),
            response: json!({ "verbs": [] }),
        }
    }

    #[tokio::test]
    async fn newest_entry_comes_first() {
        let log = InMemoryAuditLog::with_defaults();

        log.record(record(1)).await;
        log.record(record(2)).await;

        let entries = log.list().await;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].body, json!({ "digits": "2" }));
        assert_eq!(entries[1].body, json!({ "digits": "1" }));
    }

    #[tokio::test]
    async fn oldest_entries_are_evicted_past_capacity() {
        let log = InMemoryAuditLog::new(3);

        for n in 0..5 {
            log.record(record(n)).await;
        }

        let entries = log.list().await;
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].body, json!({ "digits": "4" }));
        assert_eq!(entries[2].body, json!({ "digits": "2" }));
    }

    #[tokio::test]
    async fn clear_empties_the_log() {
        let log = InMemoryAuditLog::with_defaults();
        log.record(record(1)).await;

        log.clear().await;

        assert!(log.is_empty().await);
    }

    #[tokio::test]
    async fn concurrent_writers_never_exceed_capacity() {
        let log = InMemoryAuditLog::new(10);

        let tasks: Vec<_> = (0..50)
            .map(|n| {
                let log = log.clone();
                tokio::spawn(async move { log.record(record(n)).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(log.len().await, 10);
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        assert_eq!(InMemoryAuditLog::new(0).capacity(), 1);
    }
}
