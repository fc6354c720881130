//! Storage layer for dbd
//!
//! This crate implements the on-disk side of the database:
//! - Document: one JSON value held in a growable read-write memory mapping
//! - Store: the documents of one namespace, staged from their origin files
//!   and flushed back on close
//!
//! Origin files are never mapped directly. Each is validated and copied into
//! a staging directory first; the copy is what gets mapped and mutated.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod store;

pub use document::Document;
pub use store::{stage_copy, FlushReport, Store};
