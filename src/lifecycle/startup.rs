//! Startup orchestration.
//!
//! # Responsibilities
//! - Open the ticket store and make sure the table exists
//! - Seed demonstration data into an empty store
//! - Build the notifier and metrics reader
//! - Start the optional Prometheus exporter
//! - Bind the listener last, so traffic only arrives once everything is ready
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ServiceConfig;
use crate::http::{AppState, HttpServer};
use crate::lifecycle::seed::seed_if_empty;
use crate::notifier::{NotifyError, WebhookNotifier};
use crate::observability::metrics;
use crate::reports::MetricsReader;
use crate::store::{StoreError, TicketStore};

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("ticket store: {0}")]
    Store(#[from] StoreError),

    #[error("notifier: {0}")]
    Notifier(#[from] NotifyError),

    #[error("listener: {0}")]
    Bind(#[from] std::io::Error),
}

/// Open the store, seed it and assemble handler state.
pub async fn build_state(config: &ServiceConfig) -> Result<AppState, StartupError> {
    let store = TicketStore::connect(&config.database).await?;
    store.migrate().await?;

    if config.seed.enabled {
        seed_if_empty(&store).await?;
    }

    let notifier = WebhookNotifier::new(&config.notifier)?;
    tracing::info!(
        enabled = notifier.is_enabled(),
        url = %notifier.url(),
        timeout_secs = config.notifier.timeout_secs,
        "Notifier configured"
    );

    let reports = MetricsReader::new(&config.reports.metrics_path);
    tracing::info!(path = %reports.path().display(), "Metrics document location");

    Ok(AppState {
        store,
        reports,
        notifier,
    })
}

/// Prepare everything needed to serve: state, server and bound listener.
pub async fn prepare(config: ServiceConfig) -> Result<(HttpServer, TcpListener), StartupError> {
    let state = build_state(&config).await?;

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    Ok((HttpServer::new(config, state), listener))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::seed::SEED_COUNT;

    fn memory_config() -> ServiceConfig {
        let mut config = ServiceConfig::default();
        config.database.url = "sqlite::memory:".into();
        config
    }

    #[tokio::test]
    async fn test_build_state_seeds_store() {
        let state = build_state(&memory_config()).await.unwrap();
        assert_eq!(state.store.count().await.unwrap(), SEED_COUNT as i64);
    }

    #[tokio::test]
    async fn test_seeding_can_be_disabled() {
        let mut config = memory_config();
        config.seed.enabled = false;
        let state = build_state(&config).await.unwrap();
        assert_eq!(state.store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_prepare_binds_listener() {
        let mut config = memory_config();
        config.listener.bind_address = "127.0.0.1:0".into();
        let (server, listener) = prepare(config).await.unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);
        assert_eq!(server.config().database.url, "sqlite::memory:");
    }
}
