//! Ticket endpoints.

use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;

use crate::http::response::{ApiError, MessageBody};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::store::{Ticket, TicketId, TicketUpdate};

/// `GET /tickets`
pub async fn list_tickets(State(state): State<AppState>) -> Result<Json<Vec<Ticket>>, ApiError> {
    let tickets = state.store.list_all().await?;
    Ok(Json(tickets))
}

/// `GET /tickets/{ticket_id}`
pub async fn get_ticket(
    State(state): State<AppState>,
    ticket_id: Result<Path<TicketId>, PathRejection>,
) -> Result<Json<Ticket>, ApiError> {
    let Path(ticket_id) = ticket_id?;
    let ticket = state.store.get(ticket_id).await?;
    Ok(Json(ticket))
}

/// `PATCH /tickets/{ticket_id}`
///
/// The body is parsed as JSON whatever its `Content-Type`. The write is
/// committed before the notifier runs, and the notifier's outcome never
/// changes the response.
pub async fn update_ticket(
    State(state): State<AppState>,
    ticket_id: Result<Path<TicketId>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<MessageBody>, ApiError> {
    let Path(ticket_id) = ticket_id?;
    let update: TicketUpdate = serde_json::from_slice(&body?)?;

    let ticket = match state.store.update(ticket_id, &update).await {
        Ok(ticket) => ticket,
        Err(e) => {
            tracing::debug!(ticket_id, error = %e, "Ticket update rejected");
            return Err(e.into());
        }
    };

    metrics::record_ticket_update();
    tracing::info!(
        ticket_id,
        status = %ticket.status,
        priority = %ticket.priority,
        "Ticket updated"
    );

    state.notifier.notify_if_due(&ticket).await;

    Ok(Json(MessageBody::new("Ticket updated")))
}
