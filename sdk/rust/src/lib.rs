//! Typed client for the ticket service HTTP API.

pub mod client;

pub use client::{ClientError, Ticket, TicketClient, TicketUpdate};
