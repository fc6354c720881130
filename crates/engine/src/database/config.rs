//! Database configuration
//!
//! The configuration names every store and where its documents live:
//!
//! ```json
//! {
//!   "stores": {
//!     "default":  { "path": "/config/db" },
//!     "vms":      { "path": "/config/vms", "is_dir": true, "grow_size": 8192 },
//!     "settings": { "path": "/config/net.db" }
//!   }
//! }
//! ```
//!
//! The same schema is accepted as TOML when the file name ends in `.toml`.
//! Store names must be unique; a repeated name is rejected while parsing
//! rather than silently overwriting the earlier entry.

use dbd_core::path::RESERVED_CHARS;
use dbd_core::{Error, Result, StoreDefinition, DEFAULT_GROW_SIZE, DEFAULT_STORE};
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "/etc/dbd/dbd.json";

/// One store entry in the configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backing file, or directory when `is_dir` is set
    pub path: PathBuf,
    /// Whether `path` is a directory of documents
    #[serde(default)]
    pub is_dir: bool,
    /// Growth increment in bytes
    #[serde(default = "default_grow_size")]
    pub grow_size: usize,
}

fn default_grow_size() -> usize {
    DEFAULT_GROW_SIZE
}

impl StoreConfig {
    /// Store backed by a single file with the default growth increment
    pub fn file(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            path: path.into(),
            is_dir: false,
            grow_size: DEFAULT_GROW_SIZE,
        }
    }

    /// Store backed by a directory with the default growth increment
    pub fn dir(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            path: path.into(),
            is_dir: true,
            grow_size: DEFAULT_GROW_SIZE,
        }
    }

    /// Override the growth increment
    pub fn with_grow_size(mut self, grow_size: usize) -> Self {
        self.grow_size = grow_size;
        self
    }
}

/// Database configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Store name to store entry
    #[serde(deserialize_with = "unique_stores")]
    pub stores: BTreeMap<String, StoreConfig>,
    /// Parent directory for the staging area (system temp dir if unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staging_dir: Option<PathBuf>,
}

impl DatabaseConfig {
    /// Empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a store (builder pattern)
    pub fn with_store(mut self, name: impl Into<String>, store: StoreConfig) -> Self {
        self.stores.insert(name.into(), store);
        self
    }

    /// Set the staging parent directory (builder pattern)
    pub fn with_staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = Some(dir.into());
        self
    }

    /// Parse a JSON configuration and validate it
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: DatabaseConfig = serde_json::from_str(content)
            .map_err(|e| Error::config(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML configuration and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: DatabaseConfig = toml::from_str(content)
            .map_err(|e| Error::config(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    ///
    /// Files ending in `.toml` are parsed as TOML, anything else as JSON.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let is_toml = path.extension().is_some_and(|ext| ext == "toml");
        let parsed = if is_toml {
            Self::from_toml_str(&content)
        } else {
            Self::from_json_str(&content)
        };
        parsed.map_err(|e| match e {
            Error::Config(msg) => {
                Error::config(format!("config file '{}': {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Check every store entry.
    ///
    /// Runs before anything touches the filesystem.
    pub fn validate(&self) -> Result<()> {
        for (name, store) in &self.stores {
            if name.is_empty() {
                return Err(Error::config("store name cannot be empty"));
            }
            if let Some(c) = name
                .chars()
                .find(|c| *c == '/' || RESERVED_CHARS.contains(c))
            {
                return Err(Error::config(format!(
                    "store name '{}' contains reserved character '{}'",
                    name, c
                )));
            }
            if store.grow_size == 0 {
                return Err(Error::config(format!(
                    "store '{}': grow_size must be greater than zero",
                    name
                )));
            }
            if name == DEFAULT_STORE && store.is_dir {
                return Err(Error::config(
                    "default data store can have only one backing file",
                ));
            }
        }
        Ok(())
    }

    /// Store definitions in name order
    pub fn definitions(&self) -> Vec<StoreDefinition> {
        self.stores
            .iter()
            .map(|(name, store)| StoreDefinition {
                name: name.clone(),
                path: store.path.clone(),
                is_dir: store.is_dir,
                grow_size: store.grow_size,
            })
            .collect()
    }
}

fn unique_stores<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, StoreConfig>, D::Error>
where
    D: Deserializer<'de>,
{
    struct StoresVisitor;

    impl<'de> Visitor<'de> for StoresVisitor {
        type Value = BTreeMap<String, StoreConfig>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of store names to store entries")
        }

        fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut stores = BTreeMap::new();
            while let Some((name, store)) = access.next_entry::<String, StoreConfig>()? {
                if stores.contains_key(&name) {
                    return Err(if name == DEFAULT_STORE {
                        de::Error::custom("can only have one default data store")
                    } else {
                        de::Error::custom(format!("duplicate store name '{}'", name))
                    });
                }
                stores.insert(name, store);
            }
            Ok(stores)
        }
    }

    deserializer.deserialize_map(StoresVisitor)
}
