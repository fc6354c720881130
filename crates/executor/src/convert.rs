//! Error conversion from internal error types.
//!
//! This module provides conversions from [`dbd_core::Error`] to the
//! executor's [`Error`] type. Source chains are flattened into the message
//! so the result stays serializable.

use crate::Error;

impl From<dbd_core::Error> for Error {
    fn from(err: dbd_core::Error) -> Self {
        match err {
            dbd_core::Error::Config(reason) => Error::Config { reason },
            dbd_core::Error::Path(reason) => Error::InvalidPath { reason },
            dbd_core::Error::NotFound(key) => Error::NotFound { key },
            dbd_core::Error::TypeMismatch {
                path,
                expected,
                found,
            } => Error::TypeMismatch {
                path,
                expected: expected.to_string(),
                actual: found.to_string(),
            },
            err @ dbd_core::Error::Format { .. } => Error::Format {
                reason: err.to_string(),
            },
            err @ dbd_core::Error::Io { .. } => Error::Io {
                reason: err.to_string(),
            },
            dbd_core::Error::Closed => Error::Closed,
        }
    }
}
