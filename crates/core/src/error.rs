//! Error types for dbd
//!
//! This module defines the error taxonomy shared by every layer of the
//! store. We use `thiserror` for automatic `Display` and `Error` trait
//! implementations. Variants that wrap a lower-level failure keep it as
//! their `source` so callers can walk the chain.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for dbd operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the configuration database
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed configuration, duplicate or invalid `default` store
    #[error("config error: {0}")]
    Config(String),

    /// Logical path failed validation or is not allowed for the operation
    #[error("invalid path: {0}")]
    Path(String),

    /// Addressed key, document or store does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Value at the path has the wrong JSON type for the operation
    #[error("type mismatch at '{path}': expected {expected}, found {found}")]
    TypeMismatch {
        /// Path where the mismatch was detected
        path: String,
        /// Expected JSON type
        expected: &'static str,
        /// Actual JSON type found
        found: &'static str,
    },

    /// Bytes that should hold JSON do not parse
    #[error("invalid JSON in {origin}: {source}")]
    Format {
        /// Where the bytes came from (file path or payload description)
        origin: String,
        /// Underlying parser error
        #[source]
        source: serde_json::Error,
    },

    /// Filesystem or mapping failure
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File or directory the operation touched
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The database has been closed
    #[error("database is closed")]
    Closed,
}

impl Error {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a path error
    pub fn path(msg: impl Into<String>) -> Self {
        Error::Path(msg.into())
    }

    /// Create a not-found error
    pub fn not_found(what: impl Into<String>) -> Self {
        Error::NotFound(what.into())
    }

    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Wrap a JSON parse error with the origin of the bytes
    pub fn format(origin: impl Into<String>, source: serde_json::Error) -> Self {
        Error::Format {
            origin: origin.into(),
            source,
        }
    }

    /// Check if this is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Check if this is a path error
    pub fn is_path(&self) -> bool {
        matches!(self, Error::Path(_))
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_))
    }

    /// Check if this is a type mismatch
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Error::TypeMismatch { .. })
    }
}
