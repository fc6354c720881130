//! Database struct, routing and open/close logic
//!
//! The Database owns every store, the staging directory their documents are
//! mapped from, and the lock that serializes mutations.
//!
//! ## Routing
//!
//! | Logical path | Target |
//! |--------------|--------|
//! | `/` | the database root |
//! | `/<store>` | a non-default store |
//! | `/<store>/<doc>/<a>/<b>` | `a.b` in document `doc` of `store` |
//! | `/<a>/<b>` (first segment not a store) | `a.b` in the default document |
//!
//! `default` is never addressable by name.
//!
//! ## Concurrency
//!
//! Reads run in parallel. `write`, `inject` and `rm` hold the write lock
//! for the whole document call, so mutations across all documents are
//! totally ordered. `close` takes the same lock and waits for in-flight
//! operations to finish.

mod config;

pub use config::{DatabaseConfig, StoreConfig, DEFAULT_CONFIG_PATH};

use dbd_core::path::{is_root, split, strip_root, to_internal, validate};
use dbd_core::{DottedPath, Error, Result, DEFAULT_STORE};
use dbd_storage::{Document, FlushReport, Store};
use parking_lot::{Mutex, RwLock};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;
use tempfile::TempDir;
use tracing::{info, warn};

/// Summary of a close
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CloseReport {
    /// Documents written back to their origin
    pub documents_flushed: usize,
    /// Documents whose write-back failed
    pub flush_failures: usize,
}

/// Everything that exists only while the database is open
struct OpenState {
    /// Non-default stores by name
    stores: BTreeMap<String, Store>,
    /// The store addressed without a namespace
    default: Option<Store>,
    /// Staging area holding the mapped copies; removed when dropped
    staging: TempDir,
}

/// Where a logical path points
enum Target<'a> {
    Root,
    Store(&'a Store),
    Document(&'a Document, DottedPath),
}

/// The configuration database
///
/// Create one with [`Database::open`] or [`Database::open_file`]; call
/// [`Database::close`] to write every document back. Dropping an open
/// database closes it.
///
/// # Example
///
/// ```ignore
/// use dbd_engine::{Database, DatabaseConfig, StoreConfig};
///
/// let config = DatabaseConfig::new()
///     .with_store("default", StoreConfig::file("/config/db"))
///     .with_store("settings", StoreConfig::file("/config/net.db"));
/// let db = Database::open(config)?;
///
/// db.write("/settings/net/ip", "10.0.0.2")?;
/// assert_eq!(db.read("/settings/net/ip")?, "10.0.0.2");
/// db.close();
/// ```
pub struct Database {
    config: DatabaseConfig,
    state: RwLock<Option<OpenState>>,
    write_lock: Mutex<()>,
}

impl Database {
    /// Validate `config`, stage every store and map its documents.
    ///
    /// On failure the partial staging area is removed and nothing is
    /// written back.
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        config.validate()?;

        let staging = create_staging(config.staging_dir.as_deref())?;

        let mut stores = BTreeMap::new();
        let mut default = None;
        for definition in config.definitions() {
            let store = Store::open(definition, staging.path())?;
            if store.definition().is_default() {
                default = Some(store);
            } else {
                stores.insert(store.name().to_string(), store);
            }
        }

        info!(
            target: "dbd::db",
            stores = stores.len(),
            has_default = default.is_some(),
            staging = %staging.path().display(),
            "Database opened"
        );

        Ok(Database {
            config,
            state: RwLock::new(Some(OpenState {
                stores,
                default,
                staging,
            })),
            write_lock: Mutex::new(()),
        })
    }

    /// Load a configuration file and open it
    pub fn open_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::open(DatabaseConfig::from_file(path.as_ref())?)
    }

    /// Configuration this database was opened with
    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// True until [`close`](Self::close) has run
    pub fn is_open(&self) -> bool {
        self.state.read().is_some()
    }

    /// Names of the non-default stores
    pub fn store_names(&self) -> Result<Vec<String>> {
        self.with_state(|state| Ok(state.stores.keys().cloned().collect()))
    }

    /// Write every document back to its origin, then release all mappings
    /// and remove the staging area.
    ///
    /// Write-back is best effort: failures are logged and counted. Calling
    /// close again is a no-op that returns an empty report.
    pub fn close(&self) -> CloseReport {
        let _guard = self.write_lock.lock();
        let Some(state) = self.state.write().take() else {
            return CloseReport::default();
        };

        let mut flushed = FlushReport::default();
        for store in state.default.iter().chain(state.stores.values()) {
            flushed.merge(store.flush());
        }

        let staging_path = state.staging.path().to_path_buf();
        let OpenState {
            stores,
            default,
            staging,
        } = state;
        drop(stores);
        drop(default);
        if let Err(e) = staging.close() {
            warn!(
                target: "dbd::db",
                staging = %staging_path.display(),
                error = %e,
                "Failed to remove staging directory"
            );
        }

        info!(
            target: "dbd::db",
            documents_flushed = flushed.flushed,
            flush_failures = flushed.failed,
            "Database closed"
        );

        CloseReport {
            documents_flushed: flushed.flushed,
            flush_failures: flushed.failed,
        }
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Scalar value at `path` as text
    pub fn read(&self, path: &str) -> Result<String> {
        self.with_state(|state| {
            let (doc, inner) = leaf(route(state, path)?, path, "read")?;
            doc.read(&inner)
        })
    }

    /// UTF-8 bytes of [`read`](Self::read)
    pub fn read_binary(&self, path: &str) -> Result<Vec<u8>> {
        self.read(path).map(String::into_bytes)
    }

    /// Store `value` as a string at `path`
    pub fn write(&self, path: &str, value: &str) -> Result<()> {
        let _guard = self.write_lock.lock();
        self.with_state(|state| {
            let (doc, inner) = leaf(route(state, path)?, path, "write")?;
            doc.write(&inner, value)
        })
    }

    /// Compact JSON text at `path`
    ///
    /// The root merges every store into one object; a store path yields
    /// `{documentKey: document, ...}`.
    pub fn dump(&self, path: &str) -> Result<String> {
        self.with_state(|state| match route(state, path)? {
            Target::Root => to_json(&root_value(state)),
            Target::Store(store) => to_json(&store.to_value()),
            Target::Document(doc, inner) => doc.dump(&inner),
        })
    }

    /// Parse `value` as JSON and store it at `path`
    pub fn inject(&self, path: &str, value: &str) -> Result<()> {
        let _guard = self.write_lock.lock();
        self.with_state(|state| {
            let (doc, inner) = leaf(route(state, path)?, path, "inject")?;
            doc.inject(&inner, value)
        })
    }

    /// Child keys at `path`
    ///
    /// The root lists the default document's top-level keys followed by the
    /// names of the other stores; a store lists its document keys. A default
    /// document that is not an object contributes no keys, as in `dump("/")`.
    pub fn list(&self, path: &str) -> Result<Vec<String>> {
        self.with_state(|state| match route(state, path)? {
            Target::Root => {
                let root = DottedPath::root();
                let mut keys = match state.default.as_ref().and_then(Store::sole_document) {
                    Some(doc) if doc.is_object(&root) => doc.list(&root)?,
                    _ => Vec::new(),
                };
                for name in state.stores.keys() {
                    if !keys.contains(name) {
                        keys.push(name.clone());
                    }
                }
                Ok(keys)
            }
            Target::Store(store) => Ok(store.keys()),
            Target::Document(doc, inner) => doc.list(&inner),
        })
    }

    /// Remove the key at `path` and its subtree
    pub fn rm(&self, path: &str) -> Result<()> {
        let _guard = self.write_lock.lock();
        self.with_state(|state| {
            let (doc, inner) = leaf(route(state, path)?, path, "remove")?;
            doc.rm(&inner)
        })
    }

    /// True if something exists at `path`
    ///
    /// A missing store, document or key is `false`; an invalid path is
    /// still an error.
    pub fn exists(&self, path: &str) -> Result<bool> {
        self.with_state(|state| match route(state, path) {
            Ok(Target::Root) | Ok(Target::Store(_)) => Ok(true),
            Ok(Target::Document(doc, inner)) => Ok(doc.exists(&inner)),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        })
    }

    fn with_state<T>(&self, f: impl FnOnce(&OpenState) -> Result<T>) -> Result<T> {
        let guard = self.state.read();
        match guard.as_ref() {
            Some(state) => f(state),
            None => Err(Error::Closed),
        }
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        if self.state.get_mut().is_some() {
            self.close();
        }
    }
}

fn create_staging(parent: Option<&Path>) -> Result<TempDir> {
    let mut builder = tempfile::Builder::new();
    builder.prefix("dbd-cache");
    match parent {
        Some(dir) => builder.tempdir_in(dir).map_err(|e| Error::io(dir, e)),
        None => builder
            .tempdir()
            .map_err(|e| Error::io(std::env::temp_dir(), e)),
    }
}

/// Resolve a logical path against the open stores
fn route<'a>(state: &'a OpenState, path: &str) -> Result<Target<'a>> {
    validate(path)?;
    if is_root(path) {
        return Ok(Target::Root);
    }

    let (head, rest) = split(path);
    if head == DEFAULT_STORE {
        return Err(Error::path(format!(
            "'{}': the default store is not addressable by name",
            path
        )));
    }

    if let Some(store) = state.stores.get(head) {
        if rest.is_empty() {
            return Ok(Target::Store(store));
        }
        let (key, inner) = split(rest);
        let doc = store.document(key).ok_or_else(|| {
            Error::not_found(format!("document '{}' in store '{}'", key, head))
        })?;
        return Ok(Target::Document(doc, to_internal(inner).parse()?));
    }

    let doc = state
        .default
        .as_ref()
        .and_then(Store::sole_document)
        .ok_or_else(|| Error::not_found(format!("'{}': no default store", path)))?;
    Ok(Target::Document(doc, to_internal(strip_root(path)).parse()?))
}

/// Narrow a target to a key inside a document
fn leaf<'a>(target: Target<'a>, path: &str, op: &str) -> Result<(&'a Document, DottedPath)> {
    match target {
        Target::Document(doc, inner) if !inner.is_root() => Ok((doc, inner)),
        Target::Root => Err(Error::path(format!("cannot {} '/'", op))),
        _ => Err(Error::path(format!("'{}' is not a config key", path))),
    }
}

/// Default document content with one key per other store
fn root_value(state: &OpenState) -> Value {
    let mut root = match state.default.as_ref().and_then(Store::sole_document) {
        Some(doc) => match Value::clone(&doc.snapshot()) {
            Value::Object(map) => map,
            _ => Map::new(),
        },
        None => Map::new(),
    };
    for (name, store) in &state.stores {
        root.insert(name.clone(), store.to_value());
    }
    Value::Object(root)
}

fn to_json(value: &Value) -> Result<String> {
    serde_json::to_string(value).map_err(|e| Error::format("dump", e))
}
