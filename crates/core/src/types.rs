//! Core types for dbd
//!
//! - StoreDefinition: immutable description of one namespace and its backing files
//! - DEFAULT_STORE: name of the store reachable directly at the path root

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the store whose sole document is addressed without a namespace.
pub const DEFAULT_STORE: &str = "default";

/// Growth increment used when a definition omits `grow_size`.
pub const DEFAULT_GROW_SIZE: usize = 4096;

/// Describes one namespace: where its documents live and how they grow.
///
/// Definitions are parsed once at startup and never mutated afterwards.
///
/// # Examples
///
/// ```
/// use dbd_core::StoreDefinition;
///
/// let def = StoreDefinition::file("settings", "/config/net.db", 1024);
/// assert!(!def.is_default());
/// assert!(!def.is_dir);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreDefinition {
    /// Namespace name, unique within a configuration
    pub name: String,
    /// Backing file, or directory of files when `is_dir` is set
    pub path: PathBuf,
    /// Whether `path` is a directory holding one document per file
    pub is_dir: bool,
    /// Bytes added to a document's capacity each time it overflows
    pub grow_size: usize,
}

impl StoreDefinition {
    /// Definition for a store backed by a single file
    pub fn file(name: impl Into<String>, path: impl AsRef<Path>, grow_size: usize) -> Self {
        StoreDefinition {
            name: name.into(),
            path: path.as_ref().to_path_buf(),
            is_dir: false,
            grow_size,
        }
    }

    /// Definition for a store backed by a directory of files
    pub fn dir(name: impl Into<String>, path: impl AsRef<Path>, grow_size: usize) -> Self {
        StoreDefinition {
            name: name.into(),
            path: path.as_ref().to_path_buf(),
            is_dir: true,
            grow_size,
        }
    }

    /// True for the store addressed at the path root
    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_STORE
    }
}
