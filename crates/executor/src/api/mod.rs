//! High-level typed wrapper for the Executor.
//!
//! The [`Dbd`] struct provides a convenient Rust API that wraps the
//! [`Executor`] and [`Command`]/[`Output`] enums with typed method calls.
//!
//! # Example
//!
//! ```text
//! use dbd_executor::{Dbd, DatabaseConfig, StoreConfig};
//!
//! let db = Dbd::open(
//!     DatabaseConfig::new()
//!         .with_store("default", StoreConfig::file("/config/db"))
//!         .with_store("vms", StoreConfig::dir("/config/vms")),
//! )?;
//!
//! db.inject("/vms/vm1/net", r#"{"ip":"10.0.0.2"}"#)?;
//! assert_eq!(db.read("/vms/vm1/net/ip")?, "10.0.0.2");
//! ```

mod config_store;

pub use config_store::ConfigStore;

use std::path::Path;
use std::sync::Arc;

use dbd_engine::{CloseReport, Database, DatabaseConfig};

use crate::{Command, Error, Executor, Output, Result};

/// High-level typed wrapper for database operations.
///
/// Each method:
///
/// 1. Creates the appropriate [`Command`]
/// 2. Executes it via the [`Executor`]
/// 3. Extracts and returns the typed result
pub struct Dbd {
    executor: Executor,
}

impl Dbd {
    /// Open a database from an in-memory configuration.
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        let db = Database::open(config)?;
        Ok(Self::from_database(Arc::new(db)))
    }

    /// Open a database from a configuration file (`.toml` or JSON).
    ///
    /// ```text
    /// let db = Dbd::open_file("/etc/dbd/dbd.json")?;
    /// ```
    pub fn open_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = Database::open_file(path)?;
        Ok(Self::from_database(Arc::new(db)))
    }

    /// Wrap an already-open database.
    pub fn from_database(db: Arc<Database>) -> Self {
        Self {
            executor: Executor::new(db),
        }
    }

    /// Create another handle to the same database, e.g. for another thread.
    pub fn new_handle(&self) -> Self {
        Self::from_database(Arc::clone(self.executor.database()))
    }

    /// Get the underlying executor.
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Write every document back and release the database.
    ///
    /// Every handle sharing the database sees [`Error::Closed`] afterwards.
    pub fn close(&self) -> CloseReport {
        self.executor.database().close()
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Ping the database. Returns the crate version.
    pub fn ping(&self) -> Result<String> {
        match self.executor.execute(Command::Ping)? {
            Output::Pong { version } => Ok(version),
            _ => Err(Error::Internal {
                reason: "Unexpected output for Ping".into(),
            }),
        }
    }

    /// Read a scalar as text.
    pub fn read(&self, path: &str) -> Result<String> {
        match self.executor.execute(Command::Read {
            path: path.to_string(),
        })? {
            Output::Value(v) => Ok(v),
            _ => Err(Error::Internal {
                reason: "Unexpected output for Read".into(),
            }),
        }
    }

    /// Read a scalar as UTF-8 bytes.
    pub fn read_binary(&self, path: &str) -> Result<Vec<u8>> {
        match self.executor.execute(Command::ReadBinary {
            path: path.to_string(),
        })? {
            Output::Bytes(b) => Ok(b),
            _ => Err(Error::Internal {
                reason: "Unexpected output for ReadBinary".into(),
            }),
        }
    }

    /// Store a string value.
    pub fn write(&self, path: &str, value: &str) -> Result<()> {
        match self.executor.execute(Command::Write {
            path: path.to_string(),
            value: value.to_string(),
        })? {
            Output::Unit => Ok(()),
            _ => Err(Error::Internal {
                reason: "Unexpected output for Write".into(),
            }),
        }
    }

    /// Serialize the subtree at `path` as compact JSON.
    pub fn dump(&self, path: &str) -> Result<String> {
        match self.executor.execute(Command::Dump {
            path: path.to_string(),
        })? {
            Output::Json(json) => Ok(json),
            _ => Err(Error::Internal {
                reason: "Unexpected output for Dump".into(),
            }),
        }
    }

    /// Parse `json` and store it at `path`.
    pub fn inject(&self, path: &str, json: &str) -> Result<()> {
        match self.executor.execute(Command::Inject {
            path: path.to_string(),
            value: json.to_string(),
        })? {
            Output::Unit => Ok(()),
            _ => Err(Error::Internal {
                reason: "Unexpected output for Inject".into(),
            }),
        }
    }

    /// List child keys at `path`.
    pub fn list(&self, path: &str) -> Result<Vec<String>> {
        match self.executor.execute(Command::List {
            path: path.to_string(),
        })? {
            Output::Keys(keys) => Ok(keys),
            _ => Err(Error::Internal {
                reason: "Unexpected output for List".into(),
            }),
        }
    }

    /// Remove the key at `path` and its subtree.
    pub fn rm(&self, path: &str) -> Result<()> {
        match self.executor.execute(Command::Rm {
            path: path.to_string(),
        })? {
            Output::Unit => Ok(()),
            _ => Err(Error::Internal {
                reason: "Unexpected output for Rm".into(),
            }),
        }
    }

    /// Check whether `path` exists.
    pub fn exists(&self, path: &str) -> Result<bool> {
        match self.executor.execute(Command::Exists {
            path: path.to_string(),
        })? {
            Output::Bool(b) => Ok(b),
            _ => Err(Error::Internal {
                reason: "Unexpected output for Exists".into(),
            }),
        }
    }
}
