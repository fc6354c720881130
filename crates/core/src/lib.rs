//! Core types for dbd
//!
//! This crate defines the foundational pieces shared by every layer:
//! - Error: error taxonomy for configuration, path, lookup and I/O failures
//! - StoreDefinition: description of one namespace and its backing files
//! - path: logical path validation and splitting
//! - json: dotted-path reads and mutations on JSON values

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod json;
pub mod path;
pub mod types;

pub use error::{Error, Result};
pub use json::{
    delete_at_path, get_at_path, get_at_path_mut, scalar_text, set_at_path, value_type_name,
    DottedPath, JsonPathError, PathParseError,
};
pub use types::{StoreDefinition, DEFAULT_GROW_SIZE, DEFAULT_STORE};
