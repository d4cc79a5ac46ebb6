//! Support ticket tracking service library.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod notifier;
pub mod observability;
pub mod reports;
pub mod store;

pub use config::schema::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
