//! Error types for the audit engine.
//!
//! The analyzers themselves are total over their input domain and never
//! fail; business-level problems (missing titles, server errors) are
//! modeled as findings, not errors. `AppError` covers the crate's output
//! surface: serializing and writing reports.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Report could not be serialized to JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Report could not be written to disk
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;
