//! Request audit log configuration

use serde::Deserialize;

use super::error::{check_range, ValidationError};

/// Settings for the in-memory request audit log
#[derive(Debug, Clone, Deserialize)]
pub struct AuditConfig {
    /// Record voice requests and expose the monitor endpoints
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Entries retained before the oldest is dropped
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl AuditConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_range("AUDIT__CAPACITY", self.capacity as u64, 1, 10_000)
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            capacity: default_capacity(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_capacity() -> usize {
    crate::adapters::audit::DEFAULT_AUDIT_CAPACITY
}
