//! Live-server tests over real sockets, including restarts against one database file.

use std::time::Duration;

use ticket_desk::config::ServiceConfig;
use ticket_desk::lifecycle::seed::SEED_COUNT;
use ticket_desk::lifecycle::{startup, Shutdown};
use ticket_sdk::{TicketClient, TicketUpdate};

mod common;

fn file_config(dir: &tempfile::TempDir, webhook_url: &str) -> ServiceConfig {
    let mut config = common::test_config(dir, webhook_url);
    config.database.url = format!("sqlite://{}", dir.path().join("tickets.db").display());
    config.listener.bind_address = "127.0.0.1:0".into();
    config
}

/// Start a server, run `f` against it, then shut it down cleanly.
async fn with_server<F, Fut>(config: ServiceConfig, f: F)
where
    F: FnOnce(TicketClient) -> Fut,
    Fut: std::future::Future<Output = ()>,
{
    let (server, listener) = startup::prepare(config).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let handle = tokio::spawn(async move { server.run(listener, rx).await });

    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    f(TicketClient::with_client(http, &format!("http://{}", addr))).await;

    shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not stop")
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn test_restart_does_not_reseed_and_keeps_updates() {
    let hook = common::start_webhook_receiver(200, Duration::ZERO).await;
    let dir = tempfile::tempdir().unwrap();

    with_server(file_config(&dir, &hook.url), |client| async move {
        let tickets = client.list_tickets().await.unwrap();
        assert_eq!(tickets.len(), SEED_COUNT);

        let message = client
            .update_ticket(
                5,
                &TicketUpdate {
                    status: Some("reopened".into()),
                    priority: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(message, "Ticket updated");
    })
    .await;

    with_server(file_config(&dir, &hook.url), |client| async move {
        let tickets = client.list_tickets().await.unwrap();
        assert_eq!(tickets.len(), SEED_COUNT);

        let ticket = client.get_ticket(5).await.unwrap();
        assert_eq!(ticket.status, "reopened");
        assert_eq!(ticket.priority, "medium");
    })
    .await;
}

#[tokio::test]
async fn test_client_sees_not_found_details() {
    let hook = common::start_webhook_receiver(200, Duration::ZERO).await;
    let dir = tempfile::tempdir().unwrap();

    with_server(file_config(&dir, &hook.url), |client| async move {
        let err = client
            .update_ticket(
                777,
                &TicketUpdate {
                    status: Some("closed".into()),
                    priority: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("Ticket not found"));

        let err = client.metrics().await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("Metrics not found"));
    })
    .await;

    assert!(hook.received().is_empty());
}

#[tokio::test]
async fn test_metrics_refresh_is_visible_without_restart() {
    let hook = common::start_webhook_receiver(200, Duration::ZERO).await;
    let dir = tempfile::tempdir().unwrap();
    let metrics_path = dir.path().join("metrics.json");

    with_server(file_config(&dir, &hook.url), |client| async move {
        std::fs::write(&metrics_path, r#"{"total_tickets": 20}"#).unwrap();
        assert_eq!(client.metrics().await.unwrap()["total_tickets"], 20);

        std::fs::write(&metrics_path, r#"{"total_tickets": 21}"#).unwrap();
        assert_eq!(client.metrics().await.unwrap()["total_tickets"], 21);
    })
    .await;
}
