//! Logical path handling
//!
//! Clients address values with slash-separated logical paths such as
//! `/settings/net/ip` or, for the default store, `/hostname`. Inside a
//! document the same location is addressed with dotted syntax (`net.ip`).
//! The functions here are pure: they validate, split and convert paths
//! without touching any store.
//!
//! | Function | Input | Output |
//! |----------|-------|--------|
//! | [`validate`] | `/a/b` | `Ok(())` or [`Error::Path`] |
//! | [`split`] | `/a/b/c` | `("a", "b/c")` |
//! | [`to_internal`] | `b/c` | `b.c` |

use crate::error::{Error, Result};

/// The root logical path.
pub const ROOT: &str = "/";

/// Characters reserved for dotted syntax and wildcard matching.
pub const RESERVED_CHARS: [char; 3] = ['.', '#', '*'];

/// Check that a logical path can be routed.
///
/// Rejects the empty string, any reserved character, and empty segments
/// (`/a//b`, `/a/`). The root path `/` is valid.
///
/// # Examples
///
/// ```
/// use dbd_core::path::validate;
///
/// assert!(validate("/settings/net/ip").is_ok());
/// assert!(validate("/").is_ok());
/// assert!(validate("/a.b").is_err());
/// assert!(validate("/a//b").is_err());
/// ```
pub fn validate(path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(Error::path("empty path"));
    }

    if let Some(c) = path.chars().find(|c| RESERVED_CHARS.contains(c)) {
        return Err(Error::path(format!(
            "'{}' contains reserved character '{}'",
            path, c
        )));
    }

    if is_root(path) {
        return Ok(());
    }

    if strip_root(path).split('/').any(str::is_empty) {
        return Err(Error::path(format!("'{}' contains an empty segment", path)));
    }

    Ok(())
}

/// True if the path addresses the root of the database
pub fn is_root(path: &str) -> bool {
    path == ROOT
}

/// Strip one leading slash, if present
pub fn strip_root(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

/// Split a path into its first segment and the remainder.
///
/// One leading slash is stripped, then the path is split on the first
/// remaining slash. The tail is empty if there is no further slash.
///
/// # Examples
///
/// ```
/// use dbd_core::path::split;
///
/// assert_eq!(split("/settings/net/ip"), ("settings", "net/ip"));
/// assert_eq!(split("net/ip"), ("net", "ip"));
/// assert_eq!(split("/hostname"), ("hostname", ""));
/// ```
pub fn split(path: &str) -> (&str, &str) {
    let trimmed = strip_root(path);
    match trimmed.split_once('/') {
        Some((head, tail)) => (head, tail),
        None => (trimmed, ""),
    }
}

/// Convert a slash-separated remainder into dotted document syntax.
///
/// ```
/// use dbd_core::path::to_internal;
///
/// assert_eq!(to_internal("net/ip"), "net.ip");
/// assert_eq!(to_internal(""), "");
/// ```
pub fn to_internal(path: &str) -> String {
    path.replace('/', ".")
}
