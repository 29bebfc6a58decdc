//! HTTP adapter for the voice opt-out flow.
//!
//! - `dto` - vendor request/response shapes
//! - `handlers` - axum handlers and shared state
//! - `routes` - router construction

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{CollectWebhookRequest, DialplanResponse, VerbResponse};
pub use handlers::{get_initial_dialplan, handle_collect_webhook, SignatureCheck, VoiceAppState};
pub use routes::{voice_router, DEFAULT_COLLECT_PATH, INITIAL_DIALPLAN_PATH};
