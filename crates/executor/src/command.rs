//! Command enum defining all dbd operations.
//!
//! Commands are the "instruction set" of the call surface. Every operation a
//! client can request is represented as a variant of this enum.
//!
//! Commands are:
//! - **Self-contained**: All parameters needed for execution are in the variant
//! - **Serializable**: Can be converted to/from JSON by any transport
//! - **Pure data**: No closures or executable code

use serde::{Deserialize, Serialize};

use crate::Error;

/// Interface name the methods are exported under on the system bus
pub const BUS_INTERFACE: &str = "com.citrix.xenclient.db";

/// A command is a self-contained, serializable operation.
///
/// Every path is a slash-separated logical path such as `/settings/net/ip`.
///
/// # Example
///
/// ```ignore
/// use dbd_executor::Command;
///
/// let cmd = Command::Write {
///     path: "/settings/net/ip".into(),
///     value: "10.0.0.2".into(),
/// };
/// assert_eq!(cmd.method_name(), "write");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum Command {
    /// Check the executor is alive.
    /// Returns: `Output::Pong`
    Ping,

    /// Read a scalar as text.
    /// Returns: `Output::Value`
    Read {
        /// Logical path
        path: String,
    },

    /// Read a scalar as UTF-8 bytes.
    /// Returns: `Output::Bytes`
    ReadBinary {
        /// Logical path
        path: String,
    },

    /// Store a string value.
    /// Returns: `Output::Unit`
    Write {
        /// Logical path
        path: String,
        /// Value stored as a JSON string
        value: String,
    },

    /// Serialize the subtree at a path.
    /// Returns: `Output::Json`
    Dump {
        /// Logical path
        path: String,
    },

    /// Store a JSON value.
    /// Returns: `Output::Unit`
    Inject {
        /// Logical path
        path: String,
        /// JSON text to parse and store
        value: String,
    },

    /// List child keys.
    /// Returns: `Output::Keys`
    List {
        /// Logical path
        path: String,
    },

    /// Remove a key and its subtree.
    /// Returns: `Output::Unit`
    Rm {
        /// Logical path
        path: String,
    },

    /// Check whether a path exists.
    /// Returns: `Output::Bool`
    Exists {
        /// Logical path
        path: String,
    },
}

impl Command {
    /// Method name on the bus interface (`read`, `read_binary`, ...)
    pub fn method_name(&self) -> &'static str {
        match self {
            Command::Ping => "ping",
            Command::Read { .. } => "read",
            Command::ReadBinary { .. } => "read_binary",
            Command::Write { .. } => "write",
            Command::Dump { .. } => "dump",
            Command::Inject { .. } => "inject",
            Command::List { .. } => "list",
            Command::Rm { .. } => "rm",
            Command::Exists { .. } => "exists",
        }
    }

    /// Build a command from a bus method name and its string arguments.
    ///
    /// Transports use this to turn an incoming call into a command; an
    /// unknown method or a wrong argument count is a transport error.
    ///
    /// ```ignore
    /// let cmd = Command::from_method("write", &["/hostname".into(), "vm1".into()])?;
    /// ```
    pub fn from_method(method: &str, args: &[String]) -> Result<Command, Error> {
        let expected = match method {
            "ping" => 0,
            "read" | "read_binary" | "dump" | "list" | "rm" | "exists" => 1,
            "write" | "inject" => 2,
            other => {
                return Err(Error::Transport {
                    reason: format!("unknown method '{}'", other),
                })
            }
        };
        if args.len() != expected {
            return Err(Error::Transport {
                reason: format!(
                    "method '{}' takes {} argument(s), got {}",
                    method,
                    expected,
                    args.len()
                ),
            });
        }

        let mut args = args.iter().cloned();
        let mut next = || args.next().unwrap_or_default();
        Ok(match method {
            "read" => Command::Read { path: next() },
            "read_binary" => Command::ReadBinary { path: next() },
            "write" => Command::Write {
                path: next(),
                value: next(),
            },
            "dump" => Command::Dump { path: next() },
            "inject" => Command::Inject {
                path: next(),
                value: next(),
            },
            "list" => Command::List { path: next() },
            "rm" => Command::Rm { path: next() },
            "exists" => Command::Exists { path: next() },
            _ => Command::Ping,
        })
    }

    /// Logical path the command addresses, if any
    pub fn path(&self) -> Option<&str> {
        match self {
            Command::Ping => None,
            Command::Read { path }
            | Command::ReadBinary { path }
            | Command::Write { path, .. }
            | Command::Dump { path }
            | Command::Inject { path, .. }
            | Command::List { path }
            | Command::Rm { path }
            | Command::Exists { path } => Some(path),
        }
    }

    /// True for commands that change a document
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Command::Write { .. } | Command::Inject { .. } | Command::Rm { .. }
        )
    }
}
