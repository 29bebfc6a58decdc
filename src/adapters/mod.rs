//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `audit` - Audit log storage (in-memory ring buffer)
//! - `ciam` - Opt-out registration (HTTP client, logging fallback, mock)
//! - `http` - Axum routers for the voice and monitor endpoints

pub mod audit;
pub mod ciam;
pub mod http;

pub use audit::InMemoryAuditLog;
pub use ciam::{HttpOptOutRegistrar, LoggingOptOutRegistrar, MockOptOutRegistrar};
