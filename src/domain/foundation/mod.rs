//! Foundation module - Shared domain primitives.
//!
//! Contains the value objects and error codes used by every other part
//! of the opt-out service.

mod errors;
mod timestamp;

pub use errors::ErrorCode;
pub use timestamp::Timestamp;
