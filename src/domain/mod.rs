//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (timestamps, error codes)
//! - `voice` - The opt-out collection decision engine and its value types
pub mod foundation;
pub mod voice;
