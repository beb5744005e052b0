//! Error types for daemon client operations.

use thiserror::Error;

use crate::transport::TransportError;

/// Primary error type for client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The login request itself failed. Never retried; the underlying
    /// transport failure is carried unchanged.
    #[error("authentication with the daemon failed")]
    Auth {
        /// Transport failure from the login request.
        #[source]
        source: TransportError,
    },
    /// A request failed terminally: a non-403 rejection, a failure with
    /// retries disallowed, or the failure of the single retried attempt.
    #[error("daemon request failed")]
    Request {
        /// Transport failure from the final attempt.
        #[source]
        source: TransportError,
    },
    /// The daemon responded with a payload that could not be decoded.
    #[error("failed to decode daemon payload")]
    Decode {
        /// Decoding failure detail.
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// HTTP status of the underlying failure, when the daemon rejected the
    /// request at the HTTP level.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Auth { source } | Self::Request { source } => source.status(),
            Self::Decode { .. } => None,
        }
    }
}

/// Convenience alias for client operation results.
pub type ClientResult<T> = Result<T, ClientError>;
