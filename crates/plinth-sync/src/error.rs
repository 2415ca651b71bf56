//! Sync error types.
//!
//! Every variant is recoverable per attempt: the local catalog stays
//! authoritative and valid regardless of sync outcome, so callers report
//! these and move on rather than aborting.

use thiserror::Error;

/// Errors that can occur while pushing a catalog document to the backend.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The request did not complete within the configured timeout.
    #[error("sync timed out")]
    Timeout,

    /// The backend could not be reached at all.
    #[error("backend unreachable: {0}")]
    Unreachable(String),

    /// The backend answered with a non-success status.
    #[error("backend rejected sync ({status}): {message}")]
    Rejected {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The backend answered 2xx but the acknowledgment did not parse.
    #[error("malformed acknowledgment: {0}")]
    MalformedAck(String),
}

impl SyncError {
    /// Classify a transport-level `reqwest` failure.
    #[must_use]
    pub fn from_transport(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else {
            Self::Unreachable(error.to_string())
        }
    }
}
