//! Error types for command execution.
//!
//! All errors from command execution are represented by the [`Error`] enum.
//! These errors are:
//! - **Structured**: Each variant has typed fields for error details
//! - **Serializable**: Can be sent back to a client by any transport

use serde::{Deserialize, Serialize};

/// Command execution errors.
///
/// # Categories
///
/// | Category | Variants | Description |
/// |----------|----------|-------------|
/// | Setup | `Config` | Bad configuration at open |
/// | Addressing | `InvalidPath`, `NotFound` | Path rejected or absent |
/// | Content | `TypeMismatch`, `Format` | Wrong JSON type or unparsable JSON |
/// | System | `Io`, `Closed`, `Transport`, `Internal` | Infrastructure errors |
///
/// # Example
///
/// ```ignore
/// use dbd_executor::{Command, Error};
///
/// match executor.execute(Command::Read { path: "/hostname".into() }) {
///     Ok(output) => { /* handle success */ }
///     Err(Error::NotFound { key }) => println!("'{}' is not set", key),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    /// Invalid configuration
    #[error("config error: {reason}")]
    Config {
        /// Description of the problem
        reason: String,
    },

    /// Path failed validation or is not allowed for the operation
    #[error("invalid path: {reason}")]
    InvalidPath {
        /// Description of the problem
        reason: String,
    },

    /// Key, document or store not found
    #[error("not found: {key}")]
    NotFound {
        /// What was looked up
        key: String,
    },

    /// Value has the wrong JSON type for the operation
    #[error("type mismatch at '{path}': expected {expected}, got {actual}")]
    TypeMismatch {
        /// Dotted path inside the document
        path: String,
        /// Expected JSON type
        expected: String,
        /// Actual JSON type
        actual: String,
    },

    /// JSON text did not parse
    #[error("invalid JSON: {reason}")]
    Format {
        /// Parser message
        reason: String,
    },

    /// Filesystem or mapping failure
    #[error("I/O error: {reason}")]
    Io {
        /// Description including the file involved
        reason: String,
    },

    /// Database has been closed
    #[error("database is closed")]
    Closed,

    /// Failure in the transport carrying the call
    #[error("transport error: {reason}")]
    Transport {
        /// Description of the problem
        reason: String,
    },

    /// Internal error (bug or invariant violation)
    #[error("internal error: {reason}")]
    Internal {
        /// Description of the problem
        reason: String,
    },
}

impl Error {
    /// True for not-found errors
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// True for path validation errors
    pub fn is_invalid_path(&self) -> bool {
        matches!(self, Error::InvalidPath { .. })
    }
}
