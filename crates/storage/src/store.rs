//! Namespace store: staged documents of one definition
//!
//! Opening a store copies each origin file into `<staging>/<name>/`,
//! validating it as JSON on the way, and maps the copy. Closing writes each
//! document's content back over its origin.
//!
//! Document keys are origin file stems: `vms/vm1.db` is document `vm1`.
//! The `default` store's single document is keyed `default`, whatever its
//! file is called.

use crate::document::{create_private, Document};
use dbd_core::path::RESERVED_CHARS;
use dbd_core::{Error, Result, StoreDefinition, DEFAULT_STORE};
use serde::de::IgnoredAny;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs::{self, DirBuilder};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A staged document and the file it is written back to
struct Slot {
    document: Document,
    origin: PathBuf,
}

/// Outcome of writing documents back to their origins
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushReport {
    /// Documents written successfully
    pub flushed: usize,
    /// Documents whose write-back failed (logged)
    pub failed: usize,
}

impl FlushReport {
    /// Add another report's counts to this one
    pub fn merge(&mut self, other: FlushReport) {
        self.flushed += other.flushed;
        self.failed += other.failed;
    }
}

/// The documents of one namespace
pub struct Store {
    definition: StoreDefinition,
    staging_dir: PathBuf,
    documents: BTreeMap<String, Slot>,
}

impl Store {
    /// Stage and map every document of `definition` under `staging_root`.
    ///
    /// Directory stores take every regular file in the directory, in name
    /// order. Files whose stem cannot be addressed by a logical path are
    /// skipped with a warning.
    pub fn open(definition: StoreDefinition, staging_root: &Path) -> Result<Self> {
        let staging_dir = staging_root.join(&definition.name);
        create_staging_dir(&staging_dir)?;

        let sources = if definition.is_dir {
            directory_sources(&definition.path)?
        } else {
            vec![definition.path.clone()]
        };

        let mut documents = BTreeMap::new();
        for origin in sources {
            let key = if definition.is_default() {
                Some(DEFAULT_STORE.to_string())
            } else {
                document_key(&origin)
            };
            let key = match key {
                Some(key) => key,
                None if definition.is_dir => {
                    warn!(
                        target: "dbd::storage",
                        store = %definition.name,
                        file = %origin.display(),
                        "Skipping file whose name is not a valid document key"
                    );
                    continue;
                }
                None => {
                    return Err(Error::config(format!(
                        "store '{}': '{}' is not a valid document name",
                        definition.name,
                        origin.display()
                    )))
                }
            };

            if documents.contains_key(&key) {
                return Err(Error::config(format!(
                    "store '{}': more than one file maps to document '{}'",
                    definition.name, key
                )));
            }

            let file_name = origin.file_name().unwrap_or_default();
            let staged = staging_dir.join(file_name);
            let len = stage_copy(&origin, &staged)?;
            let document = Document::open(
                &staged,
                key.clone(),
                len + definition.grow_size,
                definition.grow_size,
            )?;
            documents.insert(key, Slot { document, origin });
        }

        info!(
            target: "dbd::storage",
            store = %definition.name,
            documents = documents.len(),
            is_dir = definition.is_dir,
            "Opened store"
        );

        Ok(Store {
            definition,
            staging_dir,
            documents,
        })
    }

    /// Namespace name
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// Definition this store was opened from
    pub fn definition(&self) -> &StoreDefinition {
        &self.definition
    }

    /// Directory holding the staged copies
    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    /// Look up a document by key
    pub fn document(&self, key: &str) -> Option<&Document> {
        self.documents.get(key).map(|slot| &slot.document)
    }

    /// The only document, if the store holds exactly one
    pub fn sole_document(&self) -> Option<&Document> {
        match self.documents.len() {
            1 => self.documents.values().next().map(|slot| &slot.document),
            _ => None,
        }
    }

    /// Document keys in sorted order
    pub fn keys(&self) -> Vec<String> {
        self.documents.keys().cloned().collect()
    }

    /// Number of documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// True if the store holds no documents
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Every document as `{key: value, ...}`
    pub fn to_value(&self) -> Value {
        let map: Map<String, Value> = self
            .documents
            .iter()
            .map(|(key, slot)| (key.clone(), Value::clone(&slot.document.snapshot())))
            .collect();
        Value::Object(map)
    }

    /// Write every document back to its origin.
    ///
    /// Failures are logged and counted; remaining documents are still written.
    pub fn flush(&self) -> FlushReport {
        let mut report = FlushReport::default();
        for (key, slot) in &self.documents {
            match slot.document.flush_to(&slot.origin) {
                Ok(()) => {
                    debug!(
                        target: "dbd::storage",
                        store = %self.definition.name,
                        document = %key,
                        origin = %slot.origin.display(),
                        "Flushed document"
                    );
                    report.flushed += 1;
                }
                Err(e) => {
                    warn!(
                        target: "dbd::storage",
                        store = %self.definition.name,
                        document = %key,
                        error = %e,
                        "Failed to flush document"
                    );
                    report.failed += 1;
                }
            }
        }
        report
    }
}

/// Document key for an origin file: its stem, if addressable
fn document_key(origin: &Path) -> Option<String> {
    let stem = origin.file_stem()?.to_str()?;
    if stem.is_empty() || stem.contains('/') || stem.contains(&RESERVED_CHARS[..]) {
        return None;
    }
    Some(stem.to_string())
}

fn directory_sources(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut sources = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let path = entry.path();
        if path.is_file() {
            sources.push(path);
        }
    }
    sources.sort();
    Ok(sources)
}

fn create_staging_dir(path: &Path) -> Result<()> {
    let mut builder = DirBuilder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o750);
    }
    builder.create(path).map_err(|e| Error::io(path, e))
}

/// Copy `src` to `dst` after checking that it holds valid JSON.
///
/// Returns the number of bytes copied. `dst` is created owner/group
/// readable only.
pub fn stage_copy(src: &Path, dst: &Path) -> Result<usize> {
    let data = fs::read(src).map_err(|e| Error::io(src, e))?;
    serde_json::from_slice::<IgnoredAny>(&data)
        .map_err(|e| Error::format(src.display().to_string(), e))?;

    let mut file = create_private(dst)?;
    file.write_all(&data).map_err(|e| Error::io(dst, e))?;
    Ok(data.len())
}
