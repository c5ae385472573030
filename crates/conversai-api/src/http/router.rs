//! Axum router configuration with middleware.
//!
//! All API routes are under `/api/`. Middleware: CORS, request tracing.
//!
//! When `server.web_dir` is configured and exists, the browser client is
//! served from it at `/`. API routes take priority; paths that match neither
//! a route nor a file get the JSON 404 body.

use axum::Router;
use axum::handler::HandlerWithoutStateExt;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.cors_origins);
    let web_dir = state.config.server.web_dir.clone();

    let api_routes = Router::new()
        .route("/chat", post(handlers::chat::chat))
        .route("/history/{session_id}", get(handlers::history::get_history))
        .route("/sessions", get(handlers::session::list_sessions))
        .route("/health", get(handlers::health::health_check));

    let router = Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    match web_dir.filter(|dir| std::path::Path::new(dir).is_dir()) {
        Some(dir) => {
            tracing::info!(path = %dir, "static file serving enabled");
            let serve_dir = ServeDir::new(&dir).not_found_service(handlers::not_found.into_service());
            router.fallback_service(serve_dir)
        }
        None => router.fallback(handlers::not_found),
    }
}

/// CORS for the configured origins. Unparsable origins are logged and skipped.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use conversai_core::inference::backend::InferenceBackend;
    use conversai_core::inference::box_backend::BoxInferenceBackend;
    use conversai_infra::sqlite::pool::{DatabasePool, database_url};
    use conversai_types::config::AppConfig;
    use conversai_types::inference::{FALLBACK_NOT_CONFIGURED, InferenceFailure};

    use super::*;

    /// Backend that echoes the prompt, or fails with a fixed failure.
    struct FakeBackend {
        failure: Option<InferenceFailure>,
        calls: Arc<AtomicU32>,
    }

    impl InferenceBackend for FakeBackend {
        fn name(&self) -> &str {
            "fake"
        }

        fn is_configured(&self) -> bool {
            !matches!(self.failure, Some(InferenceFailure::MissingCredential))
        }

        async fn generate(&self, text: &str) -> Result<String, InferenceFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.failure {
                Some(failure) => Err(failure.clone()),
                None => Ok(format!("You said: {text}")),
            }
        }
    }

    async fn make_state(config: AppConfig, failure: Option<InferenceFailure>) -> (AppState, Arc<AtomicU32>) {
        let dir = tempfile::tempdir().unwrap();
        let data_dir: PathBuf = dir.path().to_path_buf();
        let pool = DatabasePool::new(&database_url(&data_dir.join("test.db")))
            .await
            .unwrap();
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);

        let calls = Arc::new(AtomicU32::new(0));
        let backend = BoxInferenceBackend::new(FakeBackend {
            failure,
            calls: calls.clone(),
        });
        (AppState::from_parts(config, data_dir, pool, backend), calls)
    }

    async fn make_app() -> Router {
        build_router(make_state(AppConfig::default(), None).await.0)
    }

    fn post_json(uri: &str, json: &str) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(resp: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_healthy() {
        let app = make_app().await;
        let resp = app.oneshot(get("/api/health")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["model_loaded"], true);
        assert!(body["timestamp"].as_str().is_some());
    }

    #[tokio::test]
    async fn health_reports_missing_credential() {
        let (state, _) =
            make_state(AppConfig::default(), Some(InferenceFailure::MissingCredential)).await;
        let resp = build_router(state).oneshot(get("/api/health")).await.unwrap();
        let body = body_json(resp).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["model_loaded"], false);
    }

    #[tokio::test]
    async fn health_stays_healthy_after_chat_traffic() {
        for failure in [None, Some(InferenceFailure::ServiceUnavailable { attempts: 3 })] {
            let (state, _) = make_state(AppConfig::default(), failure).await;
            let app = build_router(state);

            let resp = app
                .clone()
                .oneshot(post_json("/api/chat", r#"{"message": "hi"}"#))
                .await
                .unwrap();
            assert_eq!(resp.status(), StatusCode::OK);

            let mut stamps = Vec::new();
            for _ in 0..2 {
                let resp = app.clone().oneshot(get("/api/health")).await.unwrap();
                assert_eq!(resp.status(), StatusCode::OK);
                let body = body_json(resp).await;
                assert_eq!(body["status"], "healthy");
                let stamp = chrono::DateTime::parse_from_rfc3339(
                    body["timestamp"].as_str().unwrap(),
                )
                .unwrap();
                stamps.push(stamp);
            }
            assert!(stamps[1] >= stamps[0]);
        }
    }

    #[tokio::test]
    async fn chat_replies_and_records_history() {
        let (state, calls) = make_state(AppConfig::default(), None).await;
        let app = build_router(state);

        let resp = app
            .clone()
            .oneshot(post_json(
                "/api/chat",
                r#"{"message": "  Hello  ", "session_id": "abc"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["reply"], "You said: Hello");
        assert_eq!(body["session_id"], "abc");
        assert!(body["timestamp"].as_str().is_some());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let resp = app.oneshot(get("/api/history/abc")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["session_id"], "abc");
        let conversations = body["conversations"].as_array().unwrap();
        assert_eq!(conversations.len(), 1);
        assert_eq!(conversations[0]["user_input"], "Hello");
        assert_eq!(conversations[0]["bot_response"], "You said: Hello");
        assert!(conversations[0]["timestamp"].as_str().is_some());
    }

    #[tokio::test]
    async fn chat_without_session_gets_one() {
        let app = make_app().await;
        let resp = app
            .oneshot(post_json("/api/chat", r#"{"message": "hi"}"#))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert!(!body["session_id"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn chat_empty_object_is_bad_request() {
        let (state, calls) = make_state(AppConfig::default(), None).await;
        let resp = build_router(state)
            .oneshot(post_json("/api/chat", "{}"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp).await;
        assert_eq!(body["error"], true);
        assert_eq!(body["message"], "No message provided");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn chat_blank_message_is_bad_request() {
        let app = make_app().await;
        let resp = app
            .oneshot(post_json("/api/chat", r#"{"message": "   "}"#))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn chat_malformed_json_is_bad_request() {
        let app = make_app().await;
        let resp = app
            .oneshot(post_json("/api/chat", "{not json"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp).await;
        assert_eq!(body["error"], true);
        assert_eq!(body["message"], "No JSON data provided");
    }

    #[tokio::test]
    async fn chat_inference_failure_still_replies() {
        let (state, _) =
            make_state(AppConfig::default(), Some(InferenceFailure::MissingCredential)).await;
        let app = build_router(state);

        let resp = app
            .clone()
            .oneshot(post_json("/api/chat", r#"{"message": "hi", "session_id": "s"}"#))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["reply"], FALLBACK_NOT_CONFIGURED);

        let body = body_json(app.oneshot(get("/api/history/s")).await.unwrap()).await;
        assert_eq!(body["conversations"][0]["bot_response"], FALLBACK_NOT_CONFIGURED);
    }

    #[tokio::test]
    async fn history_unknown_session_is_empty() {
        let app = make_app().await;
        let resp = app.oneshot(get("/api/history/does-not-exist")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["session_id"], "does-not-exist");
        assert_eq!(body["conversations"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn history_is_newest_first_and_capped() {
        let app = make_app().await;
        for i in 0..22 {
            let resp = app
                .clone()
                .oneshot(post_json(
                    "/api/chat",
                    &format!(r#"{{"message": "m{i}", "session_id": "s"}}"#),
                ))
                .await
                .unwrap();
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let body = body_json(app.oneshot(get("/api/history/s")).await.unwrap()).await;
        let conversations = body["conversations"].as_array().unwrap();
        assert_eq!(conversations.len(), 20);
        assert_eq!(conversations[0]["user_input"], "m21");
        assert_eq!(conversations[19]["user_input"], "m2");
    }

    #[tokio::test]
    async fn sessions_lists_summaries() {
        let app = make_app().await;
        for (msg, session) in [("a1", "a"), ("b1", "b"), ("a2", "a")] {
            app.clone()
                .oneshot(post_json(
                    "/api/chat",
                    &format!(r#"{{"message": "{msg}", "session_id": "{session}"}}"#),
                ))
                .await
                .unwrap();
        }

        let body = body_json(app.oneshot(get("/api/sessions")).await.unwrap()).await;
        let sessions = body["sessions"].as_array().unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0]["session_id"], "a");
        assert_eq!(sessions[0]["turn_count"], 2);
        assert_eq!(sessions[1]["session_id"], "b");
    }

    #[tokio::test]
    async fn unknown_route_is_json_404() {
        let app = make_app().await;
        let resp = app.oneshot(get("/api/nope")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = body_json(resp).await;
        assert_eq!(body["error"], true);
        assert_eq!(body["message"], "Endpoint not found");
    }

    #[tokio::test]
    async fn cors_allows_configured_origin() {
        let app = make_app().await;
        let req = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/chat")
            .header("origin", "http://localhost:5001")
            .header("access-control-request-method", "POST")
            .body(Body::empty())
            .unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(
            resp.headers().get("access-control-allow-origin").unwrap(),
            "http://localhost:5001"
        );

        let req = Request::get("/api/health")
            .header("origin", "http://evil.example")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert!(resp.headers().get("access-control-allow-origin").is_none());
    }

    #[tokio::test]
    async fn serves_web_dir_when_configured() {
        let web = tempfile::tempdir().unwrap();
        std::fs::write(web.path().join("index.html"), "<h1>ConversAI</h1>").unwrap();

        let mut config = AppConfig::default();
        config.server.web_dir = Some(web.path().display().to_string());
        let app = build_router(make_state(config, None).await.0);

        let resp = app.clone().oneshot(get("/")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
        assert_eq!(&bytes[..], b"<h1>ConversAI</h1>");

        let resp = app.clone().oneshot(get("/api/health")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = app.oneshot(get("/missing.js")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = body_json(resp).await;
        assert_eq!(body["message"], "Endpoint not found");
    }
}
