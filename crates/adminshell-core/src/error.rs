//! Error types for the admin shell core

use thiserror::Error;

/// Main error type for admin shell operations
#[derive(Error, Debug)]
pub enum ShellError {
    /// Color string did not match `#rrggbb`
    #[error("Invalid color format: {0}")]
    InvalidColor(String),

    /// Database creation/opening error
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    /// Transaction error
    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    /// Table error
    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    /// Storage operation error
    #[error("Storage operation error: {0}")]
    StorageOp(#[from] redb::StorageError),

    /// Commit error
    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    /// Error during serialization/deserialization
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Login/logout call rejected or unreachable
    #[error("Auth error: {0}")]
    Auth(String),
}

impl From<serde_json::Error> for ShellError {
    fn from(err: serde_json::Error) -> Self {
        ShellError::Serialization(err.to_string())
    }
}

/// Result type alias using ShellError
pub type ShellResult<T> = Result<T, ShellError>;
