//! Engine Integration Tests
//!
//! Routing, growth, lifecycle and concurrency through the public
//! `Database` API against real origin files.

#[path = "../common/mod.rs"]
mod common;

mod concurrency;
mod config;
mod growth;
mod lifecycle;
mod properties;
mod routing;
