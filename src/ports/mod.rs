//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `OptOutRegistrar` - Registers a caller's opt-out with the consent service
//! - `AuditLog` - Bounded diagnostic log of webhook requests and responses

mod audit_log;
mod opt_out_registrar;

pub use audit_log::{AuditEntry, AuditHeaders, AuditLog, AuditRecord};
pub use opt_out_registrar::{OptOutError, OptOutErrorCode, OptOutRegistrar, OptOutRegistration};
