//! Process metrics and Prometheus exposition.
//!
//! # Metrics
//! - `ticket_desk_requests_total` (counter): requests by method, route, status
//! - `ticket_desk_request_duration_seconds` (histogram): latency by method, route
//! - `ticket_desk_ticket_updates_total` (counter): committed ticket updates
//! - `ticket_desk_notifications_total` (counter): webhook attempts by outcome
//!
//! These describe the running process. They have nothing to do with the
//! precomputed metrics document served at `/metrics`.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape listener on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Prometheus exporter listening"),
        Err(e) => {
            tracing::error!(address = %addr, error = %e, "Failed to install Prometheus exporter")
        }
    }
}

/// Record one completed HTTP request.
pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    ::metrics::counter!(
        "ticket_desk_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    ::metrics::histogram!(
        "ticket_desk_request_duration_seconds",
        "method" => method.to_string(),
        "route" => route.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record a committed ticket update.
pub fn record_ticket_update() {
    ::metrics::counter!("ticket_desk_ticket_updates_total").increment(1);
}

/// Record a webhook attempt.
pub fn record_notification(delivered: bool) {
    let outcome = if delivered { "sent" } else { "failed" };
    ::metrics::counter!("ticket_desk_notifications_total", "outcome" => outcome).increment(1);
}
