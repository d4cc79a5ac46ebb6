//! HTTP API subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (assign/propagate x-request-id)
//!     → tickets.rs | reports.rs | health.rs (handlers)
//!     → response.rs (map store/report errors to status codes)
//!     → Send to client
//! ```

pub mod health;
pub mod middleware;
pub mod reports;
pub mod request;
pub mod response;
pub mod server;
pub mod tickets;

pub use request::X_REQUEST_ID;
pub use response::{ApiError, ErrorBody, MessageBody};
pub use server::{build_router, AppState, HttpServer};
