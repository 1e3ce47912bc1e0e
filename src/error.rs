//! Error types for ygo_pool

use std::time::Duration;
use thiserror::Error;

/// Unified error type for snapshot building and serving
#[derive(Error, Debug)]
pub enum PoolError {
    /// HTTP request failed (network error, connection reset, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// HTTP error status code with a body we could not interpret
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),

    /// A source answered with its structured error payload
    #[error("{feed} returned error {code} ({status}): {message}")]
    SourcePayload {
        feed: String,
        code: i64,
        message: String,
        status: String,
    },

    /// A single fetch did not complete in time
    #[error("{feed} did not respond within {after:?}")]
    Timeout { feed: String, after: Duration },

    /// Required configuration is absent
    #[error("Missing configuration: {0}")]
    MissingConfig(String),

    /// Every build attempt failed
    #[error("Snapshot build failed after {attempts} attempt(s), last error: {last}")]
    RetriesExhausted { attempts: u32, last: Box<PoolError> },

    /// No snapshot has been published yet
    #[error("Snapshot has not been built yet")]
    NotReady,

    /// I/O error (socket binding)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PoolError {
    /// Whether retrying the whole build could fix this
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PoolError::Network(_)
                | PoolError::Parse(_)
                | PoolError::HttpStatus(_)
                | PoolError::SourcePayload { .. }
                | PoolError::Timeout { .. }
        )
    }
}

/// Result alias for ygo_pool operations
pub type Result<T> = std::result::Result<T, PoolError>;
