//! Route configuration for voice endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{get_initial_dialplan, handle_collect_webhook, VoiceAppState};
use crate::adapters::http::error::method_not_allowed;

/// Where the collect webhook is mounted unless configured otherwise.
pub const DEFAULT_COLLECT_PATH: &str = "/api/voice/hooks/collect/opt-out";

/// Fixed path of the opening dialplan.
pub const INITIAL_DIALPLAN_PATH: &str = "/api/voice/dialplans/opt-out/initial";

/// Creates the voice router.
///
/// Routes:
/// - `POST {collect_path}?attempt=N` - Collect webhook
/// - `GET|POST /api/voice/dialplans/opt-out/initial` - Opening dialplan
///
/// `collect_path` is the same path the collect verbs advertise, so the
/// platform's callbacks land on this route. Any other method on these paths
/// gets a 405.
pub fn voice_router(collect_path: &str) -> Router<VoiceAppState> {
    Router::new()
        .route(
            collect_path,
            post(handle_collect_webhook).fallback(method_not_allowed),
        )
        .route(
            INITIAL_DIALPLAN_PATH,
            get(get_initial_dialplan)
                .post(get_initial_dialplan)
                .fallback(method_not_allowed),
        )
}
