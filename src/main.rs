//! Support ticket tracking service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client ──▶ http (router, middleware) ──▶ tickets handlers ──▶ store (sqlite)
//!                        │                            │
//!                        │                            └──▶ notifier ──▶ webhook (best effort)
//!                        │
//!                        └──▶ reports handler ──▶ reports (metrics.json on disk)
//!
//!     startup: config → logging → store → seed → notifier/reader → listener
//! ```

use std::path::PathBuf;

use clap::Parser;

use ticket_desk::config::load_or_default;
use ticket_desk::lifecycle::{signals, startup, Shutdown};
use ticket_desk::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "ticket-desk")]
#[command(about = "Support ticket tracking service", long_about = None)]
struct Args {
    /// Path to a TOML configuration file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_or_default(args.config.as_deref())?;

    init_logging(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "ticket-desk starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        database = %config.database.url,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let (server, listener) = startup::prepare(config).await?;

    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(shutdown.clone());
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
