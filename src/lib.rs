//! dbd - local configuration database for a hypervisor host
//!
//! Configuration lives in JSON files on disk. At startup each configured
//! data store is copied into a private staging area and memory-mapped;
//! every read and mutation goes through the mapping, and closing the
//! database writes each document back to the file it came from.
//!
//! # Quick Start
//!
//! ```ignore
//! use dbd::{Dbd, DatabaseConfig, StoreConfig};
//!
//! let db = Dbd::open(
//!     DatabaseConfig::new()
//!         .with_store("default", StoreConfig::file("/config/db"))
//!         .with_store("vms", StoreConfig::dir("/config/vms")),
//! )?;
//!
//! db.write("/hostname", "vm1")?;
//! assert_eq!(db.read("/hostname")?, "vm1");
//! assert_eq!(db.list("/")?, vec!["hostname", "vms"]);
//!
//! db.close();
//! ```
//!
//! # Architecture
//!
//! All operations go through the [`Executor`], which takes a [`Command`]
//! and returns an [`Output`]. [`Dbd`] wraps it with typed methods and
//! implements the [`ConfigStore`] client contract.
//!
//! Storage and routing internals are not re-exported; only the executor
//! API and the configuration types are public.

pub use dbd_executor::*;
