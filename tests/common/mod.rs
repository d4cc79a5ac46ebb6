//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tower::ServiceExt;

use ticket_desk::config::ServiceConfig;
use ticket_desk::http::{build_router, AppState};
use ticket_desk::lifecycle::startup::build_state;

pub const WEBHOOK_PATH: &str = "/webhook/ticket-update";

/// A local webhook endpoint that records every payload it receives.
pub struct WebhookReceiver {
    pub url: String,
    received: Arc<Mutex<Vec<Value>>>,
}

impl WebhookReceiver {
    pub fn received(&self) -> Vec<Value> {
        self.received.lock().unwrap().clone()
    }
}

/// Start a webhook receiver answering with `status` after `delay`.
pub async fn start_webhook_receiver(status: u16, delay: Duration) -> WebhookReceiver {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let received = Arc::new(Mutex::new(Vec::new()));

    let sink = received.clone();
    let app = Router::new().route(
        WEBHOOK_PATH,
        post(move |Json(body): Json<Value>| {
            let sink = sink.clone();
            async move {
                sink.lock().unwrap().push(body);
                tokio::time::sleep(delay).await;
                StatusCode::from_u16(status).unwrap()
            }
        }),
    );

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    WebhookReceiver {
        url: format!("http://{}{}", addr, WEBHOOK_PATH),
        received,
    }
}

/// A webhook URL nothing is listening on.
pub async fn unreachable_webhook_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}{}", addr, WEBHOOK_PATH)
}

/// Router plus the state and scratch directory behind it.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub dir: TempDir,
}

impl TestApp {
    pub fn metrics_path(&self) -> std::path::PathBuf {
        self.dir.path().join("metrics.json")
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send("GET", uri, None).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send("PATCH", uri, Some(body)).await
    }

    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let request = builder
            .body(body)
            .unwrap_or_else(|err| panic!("failed to build request: {err}"));
        self.call(request).await
    }

    /// Send a hand-built request and decode the JSON response.
    pub async fn call(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }
}

/// Config pointing at an in-memory store, a scratch metrics path and `webhook_url`.
pub fn test_config(dir: &TempDir, webhook_url: &str) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.database.url = "sqlite::memory:".into();
    config.notifier.webhook_url = webhook_url.to_string();
    config.notifier.timeout_secs = 1;
    config.notifier.connect_timeout_secs = 1;
    config.reports.metrics_path = dir.path().join("metrics.json").display().to_string();
    config
}

/// A seeded app whose notifier posts to `webhook_url`.
pub async fn spawn_app(webhook_url: &str) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir, webhook_url);
    let state = build_state(&config).await.unwrap();
    let router = build_router(&config, state.clone());
    TestApp { router, state, dir }
}
