//! Error types for the account directory.

use thiserror::Error;

/// Errors that can occur in directory operations.
#[derive(Debug, Error)]
pub enum Error {
    /// An account with this login already exists.
    #[error("user with login '{0}' already exists")]
    DuplicateLogin(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Config deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored timestamp could not be parsed.
    #[error("Invalid timestamp: {0}")]
    Timestamp(#[from] chrono::ParseError),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
