//! HTTP adapters - REST API implementations.
//!
//! Each area has its own HTTP adapter for endpoint exposure; [`app_router`]
//! assembles them and applies the shared middleware stack.

pub mod error;
pub mod monitor;
pub mod voice;

use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

// Re-export key types for convenience
pub use error::{ApiError, ErrorResponse};
pub use monitor::{monitor_router, MonitorAppState};
pub use voice::{voice_router, VoiceAppState, DEFAULT_COLLECT_PATH, INITIAL_DIALPLAN_PATH};

/// Build the complete application router.
///
/// # Routes
/// - `collect_path` and `/api/voice/dialplans/...` - voice webhooks
/// - `/api/monitor/logs` - audit log, only when `monitor` is given
/// - `GET /health` - liveness
///
/// `collect_path` must already be validated; overlapping routes panic.
pub fn app_router(
    voice: VoiceAppState,
    monitor: Option<MonitorAppState>,
    server: &ServerConfig,
    collect_path: &str,
) -> Router {
    let mut router = voice_router(collect_path).with_state(voice);
    if let Some(monitor) = monitor {
        router = router.nest("/api", monitor_router().with_state(monitor));
    }

    router
        .route("/health", get(health))
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(&server.cors_origins_list()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Any origin when `origins` is empty; unparsable origins are skipped.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(origins)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::adapters::audit::InMemoryAuditLog;
    use crate::adapters::ciam::MockOptOutRegistrar;
    use crate::domain::voice::test_support::test_builder;

    fn app(with_monitor: bool, server: &ServerConfig) -> Router {
        let audit = Arc::new(InMemoryAuditLog::new(10));
        let voice = VoiceAppState::new(
            Arc::new(test_builder()),
            Arc::new(MockOptOutRegistrar::new()),
        )
        .with_audit_log(audit.clone());
        let monitor = with_monitor.then(|| MonitorAppState::new(audit));
        app_router(voice, monitor, server, DEFAULT_COLLECT_PATH)
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = app(true, &ServerConfig::default())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], br#"{"status":"ok"}"#);
    }

    #[tokio::test]
    async fn monitor_is_absent_when_disabled() {
        let response = app(false, &ServerConfig::default())
            .oneshot(
                Request::builder()
                    .uri("/api/monitor/logs")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cors_allows_any_origin_by_default() {
        let response = app(true, &ServerConfig::default())
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("origin", "https://console.example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn cors_preflight_is_answered_by_layer() {
        let server = ServerConfig {
            cors_origins: Some("https://console.example.com".to_string()),
            ..Default::default()
        };

        let response = app(true, &server)
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/voice/hooks/collect/opt-out")
                    .header("origin", "https://console.example.com")
                    .header("access-control-request-method", "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "https://console.example.com"
        );
    }
}
