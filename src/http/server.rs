//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeouts, body limit, CORS, metrics)
//! - Bind server to listener
//! - Stop accepting and drain on shutdown, then close the store

use std::time::Duration;

use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    cors::CorsLayer, limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::http::health::get_health;
use crate::http::middleware::track_requests;
use crate::http::reports::get_metrics;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::http::tickets::{get_ticket, list_tickets, update_ticket};
use crate::lifecycle::shutdown;
use crate::notifier::WebhookNotifier;
use crate::observability::spans::make_request_span;
use crate::reports::MetricsReader;
use crate::store::TicketStore;

/// Application state injected into handlers.
///
/// Built once at startup; every handler receives a cheap clone sharing the
/// same connection pool and HTTP client.
#[derive(Clone)]
pub struct AppState {
    pub store: TicketStore,
    pub reports: MetricsReader,
    pub notifier: WebhookNotifier,
}

/// HTTP server for the ticket API.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
    store: TicketStore,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and state.
    pub fn new(config: ServiceConfig, state: AppState) -> Self {
        let store = state.store.clone();
        let router = build_router(&config, state);
        Self {
            router,
            config,
            store,
        }
    }

    /// Run the server until `shutdown_rx` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::signalled(shutdown_rx))
            .await?;

        self.store.close().await;
        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(config: &ServiceConfig, state: AppState) -> Router {
    let router = Router::new()
        .route("/tickets", get(list_tickets))
        .route("/tickets/{ticket_id}", get(get_ticket).patch(update_ticket))
        .route("/metrics", get(get_metrics))
        .route("/health", get(get_health))
        .with_state(state)
        .layer(middleware::from_fn(track_requests))
        .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(propagate_request_id_layer())
        .layer(set_request_id_layer());

    if config.security.cors_permissive {
        router.layer(CorsLayer::very_permissive())
    } else {
        router
    }
}
