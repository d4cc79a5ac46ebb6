//! Ticket record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status assigned to tickets created without one.
pub const DEFAULT_STATUS: &str = "open";

/// Priority assigned to tickets created without one.
pub const DEFAULT_PRIORITY: &str = "medium";

/// Ticket identifier, assigned by the store.
pub type TicketId = i64;

/// A stored support ticket.
///
/// `id` and `created_at` never change after insertion. `status` and
/// `priority` are free-form strings; no vocabulary is enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Ticket {
    pub id: TicketId,
    pub created_at: DateTime<Utc>,
    pub customer_name: String,
    pub channel: String,
    pub subject: String,
    pub status: String,
    pub priority: String,
}

/// Fields supplied when creating a ticket.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewTicket {
    pub customer_name: String,
    pub channel: String,
    pub subject: String,
    pub status: Option<String>,
    pub priority: Option<String>,
}

impl NewTicket {
    pub fn new(
        customer_name: impl Into<String>,
        channel: impl Into<String>,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            customer_name: customer_name.into(),
            channel: channel.into(),
            subject: subject.into(),
            status: None,
            priority: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }
}

/// Partial update body. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketUpdate {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
}

impl TicketUpdate {
    /// Status to write, if any. Empty strings count as not supplied.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref().filter(|s| !s.is_empty())
    }

    /// Priority to write, if any. Empty strings count as not supplied.
    pub fn priority(&self) -> Option<&str> {
        self.priority.as_deref().filter(|s| !s.is_empty())
    }

    /// True when applying this update would change nothing.
    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.status().is_none() && self.priority().is_none()
    }
}
