//! Common error types for LeadLens

use thiserror::Error;

/// Common result type for LeadLens operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the LeadLens service
///
/// Partial failures of secondary data sources are deliberately absent:
/// they are recovered inside the multi-source reader and only logged.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or request parameter; rejected before the data layer
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Route scope forbids the resolved target
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Evaluation payload still fails strict parsing after repair.
    /// Surfaced rather than dropped: it indicates an upstream
    /// data-entry defect.
    #[error("Malformed evaluation payload: {0}")]
    PayloadMalformed(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}
