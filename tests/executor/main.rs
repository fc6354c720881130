//! Executor Integration Tests
//!
//! The public `dbd` API as a transport or client sees it.

#[path = "../common/mod.rs"]
mod common;

mod transport;
