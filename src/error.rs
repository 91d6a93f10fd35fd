//! Error types for configuration and client requests

use std::num::ParseIntError;
use thiserror::Error;

/// Errors raised while reading the server configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// PORT is not a valid port number
    #[error("Invalid PORT value {value:?}: {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// HOST is set but blank
    #[error("HOST must not be empty")]
    EmptyHost,
}

/// Errors from client frames
#[derive(Error, Debug)]
pub enum ClientRequestError {
    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unsupported frame type
    #[error("Unsupported message type")]
    UnsupportedType,

    /// Continuation frame without a preceding first fragment
    #[error("Unexpected continuation frame")]
    UnexpectedContinuation,

    /// Fragmented message grew past the size limit
    #[error("Message exceeds {0} bytes")]
    TooLarge(usize),

    /// Reassembled text message is not valid UTF-8
    #[error("Invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
