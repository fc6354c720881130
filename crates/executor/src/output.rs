//! Output enum for command execution results.
//!
//! Every command produces exactly one output type. This mapping is deterministic:
//! the same command always produces the same output variant (though the values
//! may differ based on database state).

use serde::{Deserialize, Serialize};

/// Successful command execution results.
///
/// Each [`Command`](crate::Command) variant maps to exactly one `Output` variant.
///
/// # Example
///
/// ```text
/// use dbd_executor::{Command, Output};
///
/// match executor.execute(Command::Read { path: "/hostname".into() })? {
///     Output::Value(v) => println!("hostname = {}", v),
///     _ => unreachable!("Read always returns Value"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Output {
    /// No return value (write, inject, rm)
    Unit,

    /// Scalar rendered as text
    Value(String),

    /// Scalar rendered as UTF-8 bytes
    Bytes(Vec<u8>),

    /// Compact JSON text
    Json(String),

    /// Child key names
    Keys(Vec<String>),

    /// Boolean result
    Bool(bool),

    /// Ping response
    Pong {
        /// Crate version
        version: String,
    },
}
