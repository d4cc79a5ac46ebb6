//! Metrics document reader.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::reports::ReportError;

/// Reads the aggregate metrics document from a fixed path.
#[derive(Debug, Clone)]
pub struct MetricsReader {
    path: PathBuf,
}

impl MetricsReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the document as it currently exists on disk.
    pub async fn read(&self) -> Result<Value, ReportError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ReportError::NotFound(self.path.clone()));
            }
            Err(e) => return Err(ReportError::Io(e)),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }
}
