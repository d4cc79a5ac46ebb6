//! Outbound ticket notifications.
//!
//! # Data Flow
//! ```text
//! PATCH /tickets/{id}
//!     → store update committed
//!     → should_notify(updated ticket)?
//!         yes → webhook.rs POST {ticket_id, status, priority}
//!               → Result discarded by discard_failure()
//!         no  → nothing sent
//! ```
//!
//! # Design Decisions
//! - Best effort, at most once: no retries, no acknowledgement
//! - Every call carries a deadline so an unreachable endpoint cannot stall updates
//! - Failures never reach the HTTP caller

pub mod webhook;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::{Ticket, TicketId};

pub use webhook::WebhookNotifier;

/// Status value that triggers a notification.
pub const CLOSED_STATUS: &str = "closed";

/// Priority value that triggers a notification.
pub const HIGH_PRIORITY: &str = "high";

/// Whether the post-update state of `ticket` warrants a notification.
pub fn should_notify(ticket: &Ticket) -> bool {
    ticket.status == CLOSED_STATUS || ticket.priority == HIGH_PRIORITY
}

/// Webhook payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketNotification {
    pub ticket_id: TicketId,
    pub status: String,
    pub priority: String,
}

impl From<&Ticket> for TicketNotification {
    fn from(ticket: &Ticket) -> Self {
        Self {
            ticket_id: ticket.id,
            status: ticket.status.clone(),
            priority: ticket.priority.clone(),
        }
    }
}

/// Reasons a notification did not get through.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Connection, timeout or client-side failure.
    #[error("webhook request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("webhook returned status {0}")]
    Status(u16),
}
