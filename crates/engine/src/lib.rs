//! Database engine for dbd
//!
//! This crate ties the lower layers together:
//! - Database: store registry, logical path routing, write serialization
//! - DatabaseConfig: store definitions loaded from JSON or TOML
//!
//! The engine is the only component that knows how a logical path such as
//! `/settings/net/ip` becomes a (store, document, dotted path) triple.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod database;

pub use database::{CloseReport, Database, DatabaseConfig, StoreConfig, DEFAULT_CONFIG_PATH};
