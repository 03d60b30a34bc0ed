//! Error types for person-roster
//!
//! Failures fall into three groups:
//! - Transient fetch failures (network, HTTP status, malformed body), retried by the fetcher
//! - Pipeline outcomes (retries exhausted, cancellation)
//! - Store and I/O failures, which are fatal and never retried

use thiserror::Error;

/// Result type alias for person-roster operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for person-roster
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "source_url")
        key: Option<String>,
    },

    /// Database operation failed
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    /// SQLx database error
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Network error (connect, timeout, body read)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Source answered with a non-success status
    #[error("HTTP {status} from {url}")]
    HttpStatus {
        /// Status code returned by the source
        status: u16,
        /// URL that was requested
        url: String,
    },

    /// Response body is not a JSON array of objects
    #[error("malformed response body: {0}")]
    MalformedBody(String),

    /// Every fetch attempt failed
    #[error("no records fetched after {attempts} attempts")]
    FetchExhausted {
        /// Number of attempts that were made
        attempts: u32,
    },

    /// The run was cancelled from outside
    #[error("operation cancelled")]
    Cancelled,

    /// I/O error (report output)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Database-related errors
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to connect to database
    #[error("failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create the schema
    #[error("failed to run migrations: {0}")]
    MigrationFailed(String),

    /// Query failed
    #[error("query failed: {0}")]
    QueryFailed(String),
}
