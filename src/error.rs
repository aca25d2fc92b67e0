//! Engine error taxonomy.
//!
//! Only store I/O and serialization failures propagate as errors. Per-file
//! extraction failures are swallowed into empty records, oversized files are
//! silently skipped, unresolved imports and call sites fall back or drop out
//! of the graphs, and a query made before a build reports a structured
//! failure result. None of those surface here.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
