//! Error types for labelsync-sync.

use thiserror::Error;

use crate::gateway::Method;

/// A failed remote call. Fatal for the repository in progress; never retried here.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The service answered with a status other than 200, 201 or 204.
    #[error("{method} {url} returned HTTP {status}")]
    Status {
        method: Method,
        url: String,
        status: u16,
    },

    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("{method} {url} failed: {message}")]
    Transport {
        method: Method,
        url: String,
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("unexpected response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl GatewayError {
    /// The HTTP status, when the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// All errors that end a synchronization early.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A remote call failed.
    #[error("remote error: {0}")]
    Gateway(#[from] GatewayError),

    /// The user answered `abort` at a deletion prompt. Ends the whole run.
    #[error("stopped by user while synchronizing {repository}")]
    Aborted { repository: String },

    /// The confirmation prompt could not be read.
    #[error("failed to read confirmation: {0}")]
    Prompt(#[from] std::io::Error),
}
