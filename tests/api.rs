//! HTTP control API exercised through the router without binding a socket

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use focus_timer::{
    api::create_router,
    countdown::CountdownEngine,
    services::{DesktopNotifier, IntervalTicker},
    state::AppState,
};
use serde_json::Value;
use tower::ServiceExt;

fn app(duration_secs: i64) -> Router {
    let (ticker, ticks) = IntervalTicker::new();
    let engine = CountdownEngine::new(duration_secs, DesktopNotifier::log_only(), ticker).unwrap();
    let state = Arc::new(AppState::new(20554, "127.0.0.1".to_string(), engine, ticks));
    create_router(state)
}

async fn call(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test(start_paused = true)]
async fn toggle_twice_runs_then_stops() {
    let app = app(60);

    let (status, body) = call(&app, "POST", "/toggle").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
    assert_eq!(body["countdown"]["running"], true);
    assert_eq!(body["countdown"]["notification_pending"], true);

    let (status, body) = call(&app, "POST", "/toggle").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "stopped");
    assert_eq!(body["countdown"]["notification_pending"], false);
}

#[tokio::test(start_paused = true)]
async fn status_reports_display_and_last_action() {
    let app = app(90);

    let (_, body) = call(&app, "GET", "/status").await;
    assert_eq!(body["status"], "stopped");
    assert_eq!(body["remaining_display"], "01:30");
    assert_eq!(body["last_action"], Value::Null);

    call(&app, "POST", "/start").await;
    call(&app, "POST", "/pause").await;

    let (status, body) = call(&app, "GET", "/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["last_action"], "pause");
    assert_eq!(body["port"], 20554);
    assert_eq!(body["countdown"]["fraction_remaining"], 1.0);
}

#[tokio::test(start_paused = true)]
async fn reset_and_resume_endpoints() {
    let app = app(30);

    let (_, body) = call(&app, "POST", "/resume").await;
    assert_eq!(body["status"], "running");

    let (_, body) = call(&app, "POST", "/reset").await;
    assert_eq!(body["status"], "stopped");
    assert_eq!(body["countdown"]["elapsed_secs"], 0);
    assert_eq!(body["countdown"]["remaining_secs"], 30);
}

#[tokio::test]
async fn health_reports_ok() {
    let app = app(10);

    let (status, body) = call(&app, "GET", "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
