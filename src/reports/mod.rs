//! Precomputed report documents.
//!
//! An external batch job writes aggregate metrics to a JSON file; this
//! subsystem only reads it back.
//!
//! # Design Decisions
//! - No schema: the document is passed through as `serde_json::Value`
//! - No caching: every read goes to disk so a refreshed file shows up immediately
//! - Missing file is a typed `NotFound`; unreadable or malformed files are errors

pub mod reader;

use std::path::PathBuf;

use thiserror::Error;

pub use reader::MetricsReader;

/// Errors raised while reading a report document.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The document has not been produced yet.
    #[error("report file {} not found", .0.display())]
    NotFound(PathBuf),

    /// The file exists but could not be read.
    #[error("failed to read report file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid JSON.
    #[error("malformed report file: {0}")]
    Malformed(#[from] serde_json::Error),
}
