//! Growable memory-mapped JSON document
//!
//! A `Document` holds one JSON value in a read-write mapping of a staged
//! file. The mapping is larger than the serialized value so small edits do
//! not touch the file size; when an edit no longer fits, the file and the
//! mapping grow by whole `grow_size` increments.
//!
//! ## Buffer Layout
//!
//! ```text
//! [0, len)          compact JSON text of the current value
//! [len, capacity)   zero bytes
//! ```
//!
//! ## Consistency
//!
//! The mapping, its length and the parsed read-view live in one `Buffer`
//! behind a `RwLock`. A mutation computes the new value and its bytes under
//! an upgradable read (readers continue), then upgrades and installs both
//! together. Readers clone the `Arc` view and release the lock, so no reader
//! ever sees bytes and view from different mutations.

use dbd_core::json::{delete_at_path, get_at_path, scalar_text, set_at_path, value_type_name};
use dbd_core::{DottedPath, Error, Result};
use memmap2::MmapMut;
use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use serde_json::Value;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Mapping plus the parsed value it holds
struct Buffer {
    /// Backing file, kept open for the lifetime of the mapping
    file: File,
    /// Read-write mapping of `capacity` bytes
    map: MmapMut,
    /// Mapped size in bytes
    capacity: usize,
    /// Length of the JSON text at the start of the mapping
    len: usize,
    /// Parsed form of `map[..len]`
    view: Arc<Value>,
}

impl Buffer {
    /// Extend the file and replace the mapping.
    ///
    /// The enlarged mapping is created before the old one is dropped; if
    /// mapping fails the old one stays installed.
    fn resize(&mut self, new_capacity: usize, path: &Path) -> Result<()> {
        if new_capacity <= self.capacity {
            return Ok(());
        }

        self.file
            .set_len(new_capacity as u64)
            .map_err(|e| Error::io(path, e))?;
        // SAFETY: the file is owned by this buffer and only mutated through
        // the mapping while the document's write lock is held.
        let map = unsafe { MmapMut::map_mut(&self.file) }.map_err(|e| Error::io(path, e))?;

        self.map = map;
        self.capacity = new_capacity;
        Ok(())
    }

    /// Copy `bytes` into the mapping and swap in the matching view.
    fn install(&mut self, bytes: &[u8], value: Value) {
        let new_len = bytes.len();
        self.map[..new_len].copy_from_slice(bytes);
        if self.len > new_len {
            self.map[new_len..self.len].fill(0);
        }
        self.len = new_len;
        self.view = Arc::new(value);
    }
}

/// One JSON document backed by a memory-mapped file
///
/// All operations take dotted paths relative to the document root. A
/// `Document` is `Send + Sync`; concurrent mutations are serialized by its
/// own lock.
///
/// # Example
///
/// ```ignore
/// use dbd_storage::Document;
///
/// let doc = Document::open("/tmp/stage/net.db", "net", 8192, 4096)?;
/// doc.write(&"ip".parse()?, "10.0.0.2")?;
/// assert_eq!(doc.read(&"ip".parse()?)?, "10.0.0.2");
/// ```
pub struct Document {
    key: String,
    path: PathBuf,
    grow_size: usize,
    state: RwLock<Buffer>,
}

impl Document {
    /// Open and map a file holding one JSON value.
    ///
    /// The file is created if missing and extended to
    /// `max(initial_capacity, file length)`. Its bytes must parse
    /// as JSON.
    pub fn open(
        path: impl AsRef<Path>,
        key: impl Into<String>,
        initial_capacity: usize,
        grow_size: usize,
    ) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let key = key.into();

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| Error::io(&path, e))?;
        let len = file.metadata().map_err(|e| Error::io(&path, e))?.len() as usize;

        // A zero-length mapping is not portable
        let capacity = initial_capacity.max(len).max(1);
        file.set_len(capacity as u64)
            .map_err(|e| Error::io(&path, e))?;

        // SAFETY: the file stays open for the lifetime of the mapping and is
        // not shared with other mappings in this process.
        let map = unsafe { MmapMut::map_mut(&file) }.map_err(|e| Error::io(&path, e))?;

        let value: Value = serde_json::from_slice(&map[..len])
            .map_err(|e| Error::format(path.display().to_string(), e))?;

        debug!(
            target: "dbd::storage",
            document = %key,
            path = %path.display(),
            len,
            capacity,
            "Mapped document"
        );

        Ok(Document {
            key,
            path,
            grow_size: grow_size.max(1),
            state: RwLock::new(Buffer {
                file,
                map,
                capacity,
                len,
                view: Arc::new(value),
            }),
        })
    }

    /// Document key within its store
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Staged file the mapping is built over
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Growth increment in bytes
    pub fn grow_size(&self) -> usize {
        self.grow_size
    }

    /// Mapped size in bytes
    pub fn capacity(&self) -> usize {
        self.state.read().capacity
    }

    /// Length of the JSON text in bytes
    pub fn len(&self) -> usize {
        self.state.read().len
    }

    /// True if the buffer holds no text (never the case for an opened document)
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current parsed value
    pub fn snapshot(&self) -> Arc<Value> {
        Arc::clone(&self.state.read().view)
    }

    /// Copy of the JSON text currently in the mapping
    pub fn content(&self) -> Vec<u8> {
        let state = self.state.read();
        state.map[..state.len].to_vec()
    }

    /// Grow the mapping to at least `new_capacity` bytes. Never shrinks.
    pub fn resize(&self, new_capacity: usize) -> Result<()> {
        let mut state = self.state.write();
        let old = state.capacity;
        state.resize(new_capacity, &self.path)?;
        if state.capacity != old {
            info!(
                target: "dbd::storage",
                document = %self.key,
                from = old,
                to = state.capacity,
                "Grew document"
            );
        }
        Ok(())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Scalar value at `path` as text.
    ///
    /// Strings come back without quotes, null as the empty string. Objects
    /// and arrays are a type mismatch.
    pub fn read(&self, path: &DottedPath) -> Result<String> {
        let view = self.snapshot();
        let value = get_at_path(&view, path).ok_or_else(|| Error::not_found(path.to_string()))?;
        scalar_text(value).ok_or_else(|| Error::TypeMismatch {
            path: path.to_string(),
            expected: "scalar",
            found: value_type_name(value),
        })
    }

    /// Compact JSON text of the value at `path` (whole document for root)
    pub fn dump(&self, path: &DottedPath) -> Result<String> {
        let view = self.snapshot();
        let value = get_at_path(&view, path).ok_or_else(|| Error::not_found(path.to_string()))?;
        serde_json::to_string(value).map_err(|e| Error::format(self.key.clone(), e))
    }

    /// Keys of the object at `path`, in document order
    pub fn list(&self, path: &DottedPath) -> Result<Vec<String>> {
        let view = self.snapshot();
        match get_at_path(&view, path) {
            Some(Value::Object(obj)) => Ok(obj.keys().cloned().collect()),
            Some(other) => Err(Error::TypeMismatch {
                path: path.to_string(),
                expected: "object",
                found: value_type_name(other),
            }),
            None => Err(Error::not_found(path.to_string())),
        }
    }

    /// True if a value exists at `path`
    pub fn exists(&self, path: &DottedPath) -> bool {
        get_at_path(&self.snapshot(), path).is_some()
    }

    /// True if the value at `path` is an object
    pub fn is_object(&self, path: &DottedPath) -> bool {
        matches!(get_at_path(&self.snapshot(), path), Some(Value::Object(_)))
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Store `value` as a JSON string at `path`, creating parents as needed
    pub fn write(&self, path: &DottedPath, value: &str) -> Result<()> {
        if path.is_root() {
            return Err(Error::path("cannot write the document root"));
        }
        let value = Value::String(value.to_string());
        self.mutate(|root| set_at_path(root, path, value).map_err(|e| e.at(path)))
    }

    /// Parse `raw` as JSON and store it at `path`.
    ///
    /// An unparsable payload is a format error and leaves the document
    /// untouched. Injecting at the root replaces the whole document.
    pub fn inject(&self, path: &DottedPath, raw: &str) -> Result<()> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| Error::format("inject payload", e))?;
        self.mutate(|root| set_at_path(root, path, value).map_err(|e| e.at(path)))
    }

    /// Remove the key at `path` and everything under it
    pub fn rm(&self, path: &DottedPath) -> Result<()> {
        if path.is_root() {
            return Err(Error::path("cannot remove the document root"));
        }
        self.mutate(|root| match delete_at_path(root, path) {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(Error::not_found(path.to_string())),
            Err(e) => Err(e.at(path)),
        })
    }

    /// Apply `op` to a copy of the current value, then install the result.
    ///
    /// Nothing is installed if `op` fails or the mapping cannot grow.
    fn mutate<F>(&self, op: F) -> Result<()>
    where
        F: FnOnce(&mut Value) -> Result<()>,
    {
        let state = self.state.upgradable_read();

        let mut next = Value::clone(&state.view);
        op(&mut next)?;
        let bytes = serde_json::to_vec(&next).map_err(|e| Error::format(self.key.clone(), e))?;

        let mut state = RwLockUpgradableReadGuard::upgrade(state);
        if bytes.len() > state.capacity {
            let old = state.capacity;
            let shortfall = bytes.len() - old;
            let steps = shortfall.div_ceil(self.grow_size);
            state.resize(old + steps * self.grow_size, &self.path)?;
            info!(
                target: "dbd::storage",
                document = %self.key,
                from = old,
                to = state.capacity,
                "Grew document"
            );
        }
        state.install(&bytes, next);
        Ok(())
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Overwrite the content of `origin` with the JSON text.
    ///
    /// Exactly `len()` bytes are written; the zero tail is not. The origin
    /// is rewritten in place, so a symlink is followed and an existing
    /// file keeps its mode and owner.
    pub fn flush_to(&self, origin: &Path) -> Result<()> {
        let state = self.state.read();
        let mut file = create_private(origin)?;
        file.write_all(&state.map[..state.len])
            .map_err(|e| Error::io(origin, e))?;
        file.sync_all().map_err(|e| Error::io(origin, e))
    }
}

/// Open `path` for writing, truncated.
///
/// A missing file is created readable by owner and group only; the mode
/// does not apply to a file that already exists.
pub(crate) fn create_private(path: &Path) -> Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o640);
    }
    options.open(path).map_err(|e| Error::io(path, e))
}
