//! Audit log adapters.
//!
//! - `InMemoryAuditLog` - bounded ring buffer for a single server

mod in_memory;

pub use in_memory::{InMemoryAuditLog, DEFAULT_AUDIT_CAPACITY};
