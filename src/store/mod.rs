//! Ticket storage subsystem.
//!
//! # Data Flow
//! ```text
//! http handlers / seeder
//!     → TicketStore (sqlite.rs, pooled connections)
//!     → tickets table
//! ```
//!
//! # Design Decisions
//! - The store is the only writer of ticket state
//! - Tickets are never deleted
//! - A missing id is a typed `NotFound`, never retried

pub mod sqlite;
pub mod ticket;

use thiserror::Error;

pub use sqlite::TicketStore;
pub use ticket::{NewTicket, Ticket, TicketId, TicketUpdate};

/// Errors raised by the ticket store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No ticket has the requested id.
    #[error("ticket {0} not found")]
    NotFound(TicketId),

    /// The underlying database failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
