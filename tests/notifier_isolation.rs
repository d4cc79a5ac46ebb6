//! Failure injection for the outbound webhook.

use std::time::{Duration, Instant};

use axum::http::StatusCode;
use serde_json::json;

mod common;

#[tokio::test]
async fn test_unreachable_webhook_does_not_fail_update() {
    let url = common::unreachable_webhook_url().await;
    let app = common::spawn_app(&url).await;

    let (status, body) = app.patch("/tickets/3", json!({"status": "closed"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Ticket updated"}));

    let (_, ticket) = app.get("/tickets/3").await;
    assert_eq!(ticket["status"], "closed");
}

#[tokio::test]
async fn test_webhook_error_status_does_not_fail_update() {
    let hook = common::start_webhook_receiver(500, Duration::ZERO).await;
    let app = common::spawn_app(&hook.url).await;

    let (status, _) = app.patch("/tickets/8", json!({"priority": "high"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(hook.received().len(), 1);

    let (_, ticket) = app.get("/tickets/8").await;
    assert_eq!(ticket["priority"], "high");
}

#[tokio::test]
async fn test_slow_webhook_is_cut_off_by_timeout() {
    let hook = common::start_webhook_receiver(200, Duration::from_secs(5)).await;
    let app = common::spawn_app(&hook.url).await;

    let started = Instant::now();
    let (status, _) = app.patch("/tickets/3", json!({"status": "closed"})).await;
    let elapsed = started.elapsed();

    assert_eq!(status, StatusCode::OK);
    assert!(elapsed < Duration::from_secs(4), "update took {elapsed:?}");

    let (_, ticket) = app.get("/tickets/3").await;
    assert_eq!(ticket["status"], "closed");
}

#[tokio::test]
async fn test_disabled_notifier_sends_nothing() {
    let hook = common::start_webhook_receiver(200, Duration::ZERO).await;
    let dir = tempfile::tempdir().unwrap();
    let mut config = common::test_config(&dir, &hook.url);
    config.notifier.enabled = false;

    let state = ticket_desk::lifecycle::startup::build_state(&config).await.unwrap();
    let app = common::TestApp {
        router: ticket_desk::http::build_router(&config, state.clone()),
        state,
        dir,
    };

    let (status, _) = app.patch("/tickets/3", json!({"status": "closed"})).await;
    assert_eq!(status, StatusCode::OK);
    assert!(hook.received().is_empty());
}
