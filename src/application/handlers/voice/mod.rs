//! Voice handlers.
//!
//! ## Commands
//! - Handling a collect webhook (classification, verbs, opt-out registration)
//!
//! ## Queries
//! - The initial opt-out dialplan

mod get_initial_dialplan;
mod handle_collect;

// Commands
pub use handle_collect::{HandleCollectCommand, HandleCollectHandler, HandleCollectResult};

// Queries
pub use get_initial_dialplan::{GetInitialDialplanHandler, GetInitialDialplanQuery};
