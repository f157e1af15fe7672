//! Common error types for sentiq

use thiserror::Error;

/// Common result type for sentiq operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared by the QC and dashboard clients
#[derive(Error, Debug)]
pub enum Error {
    /// Request could not be sent or no response was received
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with a non-2xx status
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Response body did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Missing or invalid user input (no request is sent)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Referenced item absent from the current snapshot
    #[error("Not found: {0}")]
    NotFound(String),

    /// Operation not allowed in the current state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A write is still in flight
    #[error("Busy: {0}")]
    Busy(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for transport failures and non-2xx responses
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Network(_) | Error::Http { .. })
    }
}
