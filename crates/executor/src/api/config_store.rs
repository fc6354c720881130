//! Client-side contract of the configuration database.
//!
//! [`ConfigStore`] is the interface a caller programs against. [`Dbd`]
//! implements it in-process; a bus client can implement it by forwarding
//! each method as a [`Command`](crate::Command).

use super::Dbd;
use crate::Result;

/// Operations offered by the configuration database
pub trait ConfigStore {
    /// Scalar at `path` as text
    fn read(&self, path: &str) -> Result<String>;

    /// Scalar at `path` as UTF-8 bytes
    fn read_binary(&self, path: &str) -> Result<Vec<u8>>;

    /// Store `value` as a string at `path`
    fn write(&self, path: &str, value: &str) -> Result<()>;

    /// Compact JSON of the subtree at `path`
    fn dump(&self, path: &str) -> Result<String>;

    /// Parse `json` and store it at `path`
    fn inject(&self, path: &str, json: &str) -> Result<()>;

    /// Child keys at `path`
    fn list(&self, path: &str) -> Result<Vec<String>>;

    /// Remove the key at `path` and its subtree
    fn rm(&self, path: &str) -> Result<()>;

    /// Whether anything exists at `path`
    fn exists(&self, path: &str) -> Result<bool>;

    /// Read `path`, or `default` if it is not set
    fn read_or(&self, path: &str, default: &str) -> Result<String> {
        match self.read(path) {
            Ok(value) => Ok(value),
            Err(e) if e.is_not_found() => Ok(default.to_string()),
            Err(e) => Err(e),
        }
    }
}

impl ConfigStore for Dbd {
    fn read(&self, path: &str) -> Result<String> {
        Dbd::read(self, path)
    }

    fn read_binary(&self, path: &str) -> Result<Vec<u8>> {
        Dbd::read_binary(self, path)
    }

    fn write(&self, path: &str, value: &str) -> Result<()> {
        Dbd::write(self, path, value)
    }

    fn dump(&self, path: &str) -> Result<String> {
        Dbd::dump(self, path)
    }

    fn inject(&self, path: &str, json: &str) -> Result<()> {
        Dbd::inject(self, path, json)
    }

    fn list(&self, path: &str) -> Result<Vec<String>> {
        Dbd::list(self, path)
    }

    fn rm(&self, path: &str) -> Result<()> {
        Dbd::rm(self, path)
    }

    fn exists(&self, path: &str) -> Result<bool> {
        Dbd::exists(self, path)
    }
}
