//! Webhook delivery over HTTP.

use std::time::Duration;

use crate::config::NotifierConfig;
use crate::notifier::{should_notify, NotifyError, TicketNotification};
use crate::observability::metrics;
use crate::store::{Ticket, TicketId};

/// Posts ticket notifications to a fixed endpoint.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
    enabled: bool,
}

impl WebhookNotifier {
    /// Build a notifier whose every call is bounded by the configured timeouts.
    pub fn new(config: &NotifierConfig) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            url: config.webhook_url.clone(),
            enabled: config.enabled,
        })
    }

    /// Endpoint notifications are posted to.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Deliver one notification.
    pub async fn send(&self, notification: &TicketNotification) -> Result<(), NotifyError> {
        let response = self.client.post(&self.url).json(notification).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Status(status.as_u16()));
        }
        Ok(())
    }

    /// Notify about `ticket` if its current state qualifies.
    ///
    /// Returns whether a delivery was attempted. The delivery outcome is
    /// handed to [`discard_failure`] and never returned.
    pub async fn notify_if_due(&self, ticket: &Ticket) -> bool {
        if !self.enabled || !should_notify(ticket) {
            return false;
        }

        let notification = TicketNotification::from(ticket);
        match self.send(&notification).await {
            Ok(()) => {
                tracing::debug!(ticket_id = ticket.id, url = %self.url, "Ticket notification sent");
                metrics::record_notification(true);
            }
            Err(e) => discard_failure(ticket.id, e),
        }
        true
    }
}

/// Intentionally drops a failed notification.
///
/// Delivery is best effort: the ticket update has already been committed
/// and the caller gets success regardless. The failure is counted and
/// logged at debug level only.
pub fn discard_failure(ticket_id: TicketId, error: NotifyError) {
    metrics::record_notification(false);
    tracing::debug!(ticket_id, error = %error, "Ticket notification dropped");
}
