//! # dbd Executor
//!
//! The public API for dbd, the host configuration database.
//!
//! This is the only crate users need to import. It provides:
//! - [`Dbd`] - typed interface over an open database
//! - [`ConfigStore`] - the client-side contract any transport can implement
//! - [`Command`]/[`Output`] - serializable command interface for transports
//!
//! ## Quick Start
//!
//! ```text
//! use dbd_executor::Dbd;
//!
//! let db = Dbd::open_file("/etc/dbd/dbd.json")?;
//!
//! db.write("/settings/net/ip", "10.0.0.2")?;
//! let ip = db.read("/settings/net/ip")?;
//! let vms = db.list("/vms")?;
//!
//! db.close();
//! ```
//!
//! ## Call Surface
//!
//! | Method | Command | Output |
//! |--------|---------|--------|
//! | `read` | [`Command::Read`] | [`Output::Value`] |
//! | `read_binary` | [`Command::ReadBinary`] | [`Output::Bytes`] |
//! | `write` | [`Command::Write`] | [`Output::Unit`] |
//! | `dump` | [`Command::Dump`] | [`Output::Json`] |
//! | `inject` | [`Command::Inject`] | [`Output::Unit`] |
//! | `list` | [`Command::List`] | [`Output::Keys`] |
//! | `rm` | [`Command::Rm`] | [`Output::Unit`] |
//! | `exists` | [`Command::Exists`] | [`Output::Bool`] |

#![warn(missing_docs)]

mod api;
mod command;
mod convert;
mod error;
mod executor;
mod output;

// Test modules
#[cfg(test)]
mod tests;

// =============================================================================
// Public API - Everything users need is re-exported here
// =============================================================================

pub use api::{ConfigStore, Dbd};
pub use command::{Command, BUS_INTERFACE};
pub use error::Error;
pub use executor::Executor;
pub use output::Output;

// Re-export configuration types so users don't need dbd-engine directly
pub use dbd_engine::{CloseReport, DatabaseConfig, StoreConfig, DEFAULT_CONFIG_PATH};

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;
