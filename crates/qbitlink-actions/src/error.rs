//! Error types for action decoding and dispatch.

use thiserror::Error;

use qbitlink_client::{ClientError, TransportError};

/// Primary error type for action operations.
#[derive(Debug, Error)]
pub enum ActionError {
    /// The requested operation identifier has no mapped implementation.
    #[error("unknown operation '{name}'")]
    UnknownOperation {
        /// Identifier supplied by the host.
        name: String,
    },
    /// The parameter object did not decode for the requested operation.
    #[error("invalid parameters for operation '{operation}'")]
    InvalidParams {
        /// Operation whose parameters failed to decode.
        operation: String,
        /// Decoding failure detail.
        #[source]
        source: serde_json::Error,
    },
    /// The connection profile carried an unparseable base URL.
    #[error("invalid daemon base URL '{value}'")]
    InvalidBaseUrl {
        /// Offending URL text.
        value: String,
        /// Parsing failure detail.
        #[source]
        source: url::ParseError,
    },
    /// The HTTP transport for a fresh client could not be constructed.
    #[error("failed to build HTTP transport")]
    Transport {
        /// Construction failure detail.
        #[source]
        source: TransportError,
    },
    /// The dispatched client call failed.
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Convenience alias for action results.
pub type ActionResult<T> = Result<T, ActionError>;
