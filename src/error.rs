//! Error types for the elastic-dev-tools library.
//!
//! All errors are represented by the [`DevToolsError`] enum. Builder-side
//! validation failures ([`DevToolsError::InvalidArgument`],
//! [`DevToolsError::InvalidClause`]) are raised at append time, before any
//! request reaches a connection. Connection and transport failures are
//! propagated exactly as the connection reported them.
//!
//! # Examples
//!
//! ```
//! use elastic_dev_tools::error::{DevToolsError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(DevToolsError::invalid_argument("offset must not be negative"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for elastic-dev-tools operations.
#[derive(Error, Debug)]
pub enum DevToolsError {
    /// Malformed argument (negative offsets, empty identifiers, bad buckets, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A leaf clause is missing its required field or value
    #[error("Invalid clause: {0}")]
    InvalidClause(String),

    /// The engine response lacks the expected structure
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The connection could not reach the engine
    #[error("Connection error: {0}")]
    Connection(String),

    /// Opaque failure reported by a transport implementation
    #[error("Transport error: {0}")]
    Transport(#[from] anyhow::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors (config files, CLI output)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with DevToolsError.
pub type Result<T> = std::result::Result<T, DevToolsError>;

impl DevToolsError {
    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        DevToolsError::InvalidArgument(msg.into())
    }

    /// Create a new invalid clause error.
    pub fn invalid_clause<S: Into<String>>(msg: S) -> Self {
        DevToolsError::InvalidClause(msg.into())
    }

    /// Create a new malformed response error.
    pub fn malformed_response<S: Into<String>>(msg: S) -> Self {
        DevToolsError::MalformedResponse(msg.into())
    }

    /// Create a new connection error.
    pub fn connection<S: Into<String>>(msg: S) -> Self {
        DevToolsError::Connection(msg.into())
    }

    /// Wrap an opaque transport failure.
    pub fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        DevToolsError::Transport(anyhow::Error::new(err))
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        DevToolsError::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = DevToolsError::invalid_argument("offset must not be negative");
        assert_eq!(
            error.to_string(),
            "Invalid argument: offset must not be negative"
        );

        let error = DevToolsError::invalid_clause("term: field must not be empty");
        assert_eq!(
            error.to_string(),
            "Invalid clause: term: field must not be empty"
        );

        let error = DevToolsError::malformed_response("missing field `total`");
        assert_eq!(error.to_string(), "Malformed response: missing field `total`");
    }

    #[test]
    fn test_transport_error_keeps_source() {
        let io_error = io::Error::new(io::ErrorKind::ConnectionRefused, "refused");
        let error = DevToolsError::transport(io_error);

        match error {
            DevToolsError::Transport(inner) => {
                assert!(inner.downcast_ref::<io::Error>().is_some());
            }
            _ => panic!("Expected Transport variant"),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = DevToolsError::from(io_error);

        match error {
            DevToolsError::Io(_) => {}
            _ => panic!("Expected IO error variant"),
        }
    }
}
