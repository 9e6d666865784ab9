#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use taskboard_server::backend::HttpBackend;
use taskboard_server::web::{DashboardState, create_app};
use tower::ServiceExt;
use wiremock::MockServer;

/// Test context for endpoint tests: a fake upstream API and an app using it.
pub struct TestContext {
    pub upstream: MockServer,
    pub app: Router,
}

pub async fn setup() -> anyhow::Result<TestContext> {
    let upstream = MockServer::start().await;
    let backend = HttpBackend::new(&upstream.uri(), Duration::from_secs(5))?;
    let state = DashboardState::new(Arc::new(backend), Duration::from_millis(50));
    let app = create_app(Arc::new(state));
    Ok(TestContext { upstream, app })
}

pub async fn setup_backend() -> anyhow::Result<(MockServer, HttpBackend)> {
    let upstream = MockServer::start().await;
    let backend = HttpBackend::new(&upstream.uri(), Duration::from_secs(5))?;
    Ok((upstream, backend))
}

/// Sends `request` through `app` and returns the status with the raw body.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

/// Sends `request` through `app` and parses the JSON answer.
pub async fn send_json(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let (status, body) = send(app, request).await;
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_str(&body).unwrap()
    };
    (status, json)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn with_json(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}
