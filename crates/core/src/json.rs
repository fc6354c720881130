//! Dotted-path operations on JSON values
//!
//! This module defines how a location inside one document is addressed and
//! how values are read, replaced and removed at that location:
//! - DottedPath: parsed form of `net.ip` style paths
//! - get_at_path / get_at_path_mut: traversal
//! - set_at_path: replace or create, building intermediate objects
//! - delete_at_path: remove a key or array element
//!
//! # Path Syntax
//!
//! | Syntax | Meaning | Example |
//! |--------|---------|---------|
//! | `key` | Object property | `hostname` |
//! | `a.b` | Nested property | `net.ip` |
//! | `a.0` | Array element (numeric segment on an array) | `dns.0` |
//! | (empty) | Whole document | `` |

use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::error::Error;

// =============================================================================
// DottedPath
// =============================================================================

/// Error type for dotted path parsing
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathParseError {
    /// Empty key in path
    #[error("empty key in path at segment {0}")]
    EmptyKey(usize),
}

/// A path into a JSON document
///
/// A sequence of key segments. When traversal reaches an array, a numeric
/// segment selects the element at that index.
///
/// # Examples
///
/// ```
/// use dbd_core::json::DottedPath;
///
/// let root = DottedPath::root();
/// assert!(root.is_root());
///
/// let path: DottedPath = "net.ip".parse().unwrap();
/// assert_eq!(path.len(), 2);
/// assert_eq!(path.to_string(), "net.ip");
/// assert_eq!(path.parent().unwrap().to_string(), "net");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DottedPath {
    segments: Vec<String>,
}

impl DottedPath {
    /// Create the root path (empty path)
    pub fn root() -> Self {
        DottedPath {
            segments: Vec::new(),
        }
    }

    /// Get the path segments
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Get the number of segments in the path
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if the path has no segments
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Check if this is the root path
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Append a key segment (builder pattern)
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.segments.push(key.into());
        self
    }

    /// Get the parent path (None if root)
    pub fn parent(&self) -> Option<DottedPath> {
        if self.segments.is_empty() {
            None
        } else {
            let mut parent = self.clone();
            parent.segments.pop();
            Some(parent)
        }
    }

    /// Get the last segment (None if root)
    pub fn last_segment(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }
}

impl FromStr for DottedPath {
    type Err = PathParseError;

    /// Parse a dotted path; the empty string is the root.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(DottedPath::root());
        }

        let mut segments = Vec::new();
        for (i, part) in s.split('.').enumerate() {
            if part.is_empty() {
                return Err(PathParseError::EmptyKey(i));
            }
            segments.push(part.to_string());
        }
        Ok(DottedPath { segments })
    }
}

impl fmt::Display for DottedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl From<PathParseError> for Error {
    fn from(e: PathParseError) -> Self {
        Error::Path(e.to_string())
    }
}

// =============================================================================
// Path Operations Error
// =============================================================================

/// Error type for path operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JsonPathError {
    /// Type mismatch during path traversal
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// Expected type
        expected: &'static str,
        /// Actual type found
        found: &'static str,
    },

    /// Array index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds {
        /// The requested index
        index: usize,
        /// The array length
        len: usize,
    },

    /// Path not found
    #[error("path not found")]
    NotFound,
}

impl JsonPathError {
    /// Attach the path the operation was applied to
    pub fn at(self, path: &DottedPath) -> Error {
        match self {
            JsonPathError::TypeMismatch { expected, found } => Error::TypeMismatch {
                path: path.to_string(),
                expected,
                found,
            },
            JsonPathError::IndexOutOfBounds { index, len } => Error::NotFound(format!(
                "{} (index {} out of bounds for length {})",
                path, index, len
            )),
            JsonPathError::NotFound => Error::NotFound(path.to_string()),
        }
    }
}

// =============================================================================
// Path Operations
// =============================================================================

/// Get value at path within a JSON document
///
/// Returns `None` if the path doesn't exist or traverses through a scalar.
///
/// # Examples
///
/// ```
/// use dbd_core::json::{get_at_path, DottedPath};
///
/// let json = serde_json::json!({
///     "net": { "ip": "10.0.0.1", "dns": ["1.1.1.1", "8.8.8.8"] }
/// });
///
/// let ip = get_at_path(&json, &"net.ip".parse().unwrap()).unwrap();
/// assert_eq!(ip.as_str(), Some("10.0.0.1"));
///
/// let dns = get_at_path(&json, &"net.dns.1".parse().unwrap()).unwrap();
/// assert_eq!(dns.as_str(), Some("8.8.8.8"));
///
/// assert_eq!(get_at_path(&json, &DottedPath::root()), Some(&json));
/// ```
pub fn get_at_path<'a>(value: &'a Value, path: &DottedPath) -> Option<&'a Value> {
    let mut current = value;

    for segment in path.segments() {
        current = match current {
            Value::Object(obj) => obj.get(segment)?,
            Value::Array(arr) => arr.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    Some(current)
}

/// Get mutable reference to value at path within a JSON document
pub fn get_at_path_mut<'a>(value: &'a mut Value, path: &DottedPath) -> Option<&'a mut Value> {
    let mut current = value;

    for segment in path.segments() {
        current = match current {
            Value::Object(obj) => obj.get_mut(segment)?,
            Value::Array(arr) => arr.get_mut(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    Some(current)
}

// =============================================================================
// Path Mutation
// =============================================================================

/// Set value at path within a JSON document
///
/// Creates intermediate objects when a key along the path is missing.
/// Traversal never replaces an existing scalar with an object: setting
/// `a.b` when `a` is a string is a type mismatch.
///
/// # Examples
///
/// ```
/// use dbd_core::json::{get_at_path, set_at_path, DottedPath};
/// use serde_json::json;
///
/// let mut doc = json!({});
/// let path: DottedPath = "vm.net.ip".parse().unwrap();
/// set_at_path(&mut doc, &path, json!("10.0.0.2")).unwrap();
/// assert_eq!(doc, json!({"vm": {"net": {"ip": "10.0.0.2"}}}));
///
/// // Replace root value
/// set_at_path(&mut doc, &DottedPath::root(), json!(42)).unwrap();
/// assert_eq!(doc, json!(42));
/// ```
pub fn set_at_path(root: &mut Value, path: &DottedPath, value: Value) -> Result<(), JsonPathError> {
    let Some((last, parents)) = path.segments().split_last() else {
        *root = value;
        return Ok(());
    };

    let mut current = root;

    // Navigate to parent, creating intermediates
    for segment in parents {
        current = match current {
            Value::Object(obj) => obj
                .entry(segment.clone())
                .or_insert_with(|| Value::Object(Map::new())),
            Value::Array(arr) => {
                let idx = array_index(segment)?;
                let len = arr.len();
                arr.get_mut(idx)
                    .ok_or(JsonPathError::IndexOutOfBounds { index: idx, len })?
            }
            other => {
                return Err(JsonPathError::TypeMismatch {
                    expected: "object",
                    found: value_type_name(other),
                })
            }
        };
    }

    // Set the value at the last segment
    match current {
        Value::Object(obj) => {
            obj.insert(last.clone(), value);
            Ok(())
        }
        Value::Array(arr) => {
            let idx = array_index(last)?;
            if idx < arr.len() {
                arr[idx] = value;
                Ok(())
            } else if idx == arr.len() {
                arr.push(value);
                Ok(())
            } else {
                Err(JsonPathError::IndexOutOfBounds {
                    index: idx,
                    len: arr.len(),
                })
            }
        }
        other => Err(JsonPathError::TypeMismatch {
            expected: "object",
            found: value_type_name(other),
        }),
    }
}

fn array_index(segment: &str) -> Result<usize, JsonPathError> {
    segment
        .parse::<usize>()
        .map_err(|_| JsonPathError::TypeMismatch {
            expected: "object",
            found: "array",
        })
}

/// Get type name for error messages
pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Path Deletion
// =============================================================================

/// Delete value at path within a JSON document
///
/// Removes the key (and its subtree) for objects, or the element for arrays.
/// Deleting the root replaces the value with null.
///
/// # Returns
///
/// * `Ok(Some(value))` - The deleted value
/// * `Ok(None)` - The path didn't exist
/// * `Err(JsonPathError)` - Type mismatch during traversal
///
/// # Examples
///
/// ```
/// use dbd_core::json::{delete_at_path, get_at_path};
/// use serde_json::json;
///
/// let mut doc = json!({"name": "vm1", "mem": 512});
/// let deleted = delete_at_path(&mut doc, &"name".parse().unwrap()).unwrap();
/// assert_eq!(deleted, Some(json!("vm1")));
/// assert!(get_at_path(&doc, &"name".parse().unwrap()).is_none());
///
/// let missing = delete_at_path(&mut doc, &"name".parse().unwrap()).unwrap();
/// assert_eq!(missing, None);
/// ```
pub fn delete_at_path(root: &mut Value, path: &DottedPath) -> Result<Option<Value>, JsonPathError> {
    let Some(last) = path.last_segment() else {
        return Ok(Some(std::mem::take(root)));
    };

    // Navigate to parent
    let parent_path = path.parent().ok_or(JsonPathError::NotFound)?;
    let Some(parent) = get_at_path_mut(root, &parent_path) else {
        return Ok(None);
    };

    match parent {
        Value::Object(obj) => Ok(obj.shift_remove(last)),
        Value::Array(arr) => match last.parse::<usize>() {
            Ok(idx) if idx < arr.len() => Ok(Some(arr.remove(idx))),
            _ => Ok(None),
        },
        other => Err(JsonPathError::TypeMismatch {
            expected: "object",
            found: value_type_name(other),
        }),
    }
}

// =============================================================================
// Scalars
// =============================================================================

/// Text form of a scalar value, or `None` for objects and arrays.
///
/// Strings are returned without quotes, numbers and booleans as their JSON
/// text, and null as the empty string.
///
/// ```
/// use dbd_core::json::scalar_text;
/// use serde_json::json;
///
/// assert_eq!(scalar_text(&json!("vm1")).as_deref(), Some("vm1"));
/// assert_eq!(scalar_text(&json!(512)).as_deref(), Some("512"));
/// assert_eq!(scalar_text(&json!(null)).as_deref(), Some(""));
/// assert_eq!(scalar_text(&json!({})), None);
/// ```
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}
