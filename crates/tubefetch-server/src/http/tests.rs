use super::*;
use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use tempfile::TempDir;
use tower::ServiceExt;
use tubefetch_core::config::EngineConfig;
use tubefetch_core::engine::{EngineError, EngineProfile, ExtractionEngine, ExtractionOptions};
use tubefetch_core::retry::RetryPolicy;

/// Engine that fails the first `failures` calls, then succeeds.
struct CountingEngine {
    failures: u32,
    calls: AtomicU32,
}

impl CountingEngine {
    fn new(failures: u32) -> Arc<Self> {
        Arc::new(Self {
            failures,
            calls: AtomicU32::new(0),
        })
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExtractionEngine for CountingEngine {
    fn name(&self) -> &'static str {
        "counting"
    }

    async fn extract(&self, _options: &ExtractionOptions) -> Result<(), EngineError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if n <= self.failures {
            Err(EngineError::Failed {
                status: Some(1),
                stderr: "ERROR: secret stderr detail".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

/// Engine whose every attempt panics.
struct PanickingEngine;

#[async_trait]
impl ExtractionEngine for PanickingEngine {
    fn name(&self) -> &'static str {
        "panicking"
    }

    async fn extract(&self, _options: &ExtractionOptions) -> Result<(), EngineError> {
        panic!("engine state corrupted");
    }
}

/// Log sink for asserting on emitted levels.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn app(engine: Arc<dyn ExtractionEngine>) -> (Router, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let profile = EngineProfile::new(&EngineConfig::default(), Path::new("ffmpeg"));
    let fetcher = Fetcher::new(engine, profile, RetryPolicy::immediate(3));
    let state = AppState::new(Arc::new(fetcher), &dir.path().join("downloads"));
    (router(state), dir)
}

fn post_download(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/download")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_running() {
    let (app, _dir) = app(CountingEngine::new(0));
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({"status": "API is running"}));
}

#[tokio::test]
async fn video_download_succeeds() {
    let engine = CountingEngine::new(0);
    let (app, dir) = app(engine.clone());
    let response = app
        .oneshot(post_download(
            r#"{"url": "https://youtu.be/olUDirBTsTY?si=abc", "mode": "video"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({"status": "success", "mode": "video", "message": "Download completed"})
    );
    assert_eq!(engine.calls(), 1);
    assert!(dir.path().join("downloads").is_dir());
}

#[tokio::test]
async fn mode_is_normalised_in_response() {
    let engine = CountingEngine::new(0);
    let (app, _dir) = app(engine.clone());
    let response = app
        .oneshot(post_download(
            r#"{"url": "https://www.youtube.com/watch?v=olUDirBTsTY", "mode": "BOTH"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["mode"], "both");
    assert_eq!(engine.calls(), 2);
}

#[tokio::test]
async fn unknown_mode_is_rejected_before_fetching() {
    let engine = CountingEngine::new(0);
    let (app, dir) = app(engine.clone());
    let response = app
        .oneshot(post_download(
            r#"{"url": "https://youtu.be/olUDirBTsTY", "mode": "mp3"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({"detail": "Mode must be 'video', 'audio' or 'both'"})
    );
    assert_eq!(engine.calls(), 0);
    assert!(!dir.path().join("downloads").exists());
}

#[tokio::test]
async fn invalid_url_is_bad_request() {
    let engine = CountingEngine::new(0);
    let (app, _dir) = app(engine.clone());
    let response = app
        .oneshot(post_download(
            r#"{"url": "https://vimeo.com/12345", "mode": "audio"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await, json!({"detail": "Not a valid YouTube URL"}));
    assert_eq!(engine.calls(), 0);
}

#[tokio::test]
async fn empty_url_is_bad_request() {
    let (app, _dir) = app(CountingEngine::new(0));
    let response = app
        .oneshot(post_download(r#"{"url": "   ", "mode": "video"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({"detail": "URL must be a non-empty string"})
    );
}

#[tokio::test]
async fn exhausted_retries_are_a_generic_server_error() {
    let engine = CountingEngine::new(u32::MAX);
    let (app, _dir) = app(engine.clone());
    let response = app
        .oneshot(post_download(
            r#"{"url": "https://youtu.be/olUDirBTsTY", "mode": "video"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    let detail = body["detail"].as_str().unwrap();
    assert!(!detail.contains("secret stderr"), "{detail}");
    assert_eq!(engine.calls(), 3);
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let engine = CountingEngine::new(0);
    let (app, _dir) = app(engine.clone());
    for body in [r#"{"url": "https://youtu.be/olUDirBTsTY"}"#, "not json", ""] {
        let response = app.clone().oneshot(post_download(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body:?}");
        assert!(json_body(response).await["detail"].is_string());
    }
    assert_eq!(engine.calls(), 0);
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let (app, _dir) = app(CountingEngine::new(0));
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/download")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert!(response.status().is_success());
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}

#[tokio::test]
async fn engine_panic_becomes_internal_error() {
    let (app, _dir) = app(Arc::new(PanickingEngine));
    let response = app
        .oneshot(post_download(
            r#"{"url": "https://youtu.be/olUDirBTsTY", "mode": "video"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(response).await, json!({"detail": "Internal server error"}));
}

#[tokio::test]
async fn invalid_url_is_logged_as_warning_not_error() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let (app, _dir) = app(CountingEngine::new(0));
    let response = app
        .oneshot(post_download(
            r#"{"url": "https://vimeo.com/12345", "mode": "video"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let text = logs.text();
    assert!(text.contains("download request rejected"), "{text}");
    assert!(!text.contains("ERROR"), "{text}");
}
