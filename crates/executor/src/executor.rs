//! The Executor - single entry point to the database.
//!
//! The Executor is a stateless dispatcher that routes commands to the
//! database and wraps results in outputs.

use std::sync::Arc;

use dbd_engine::Database;
use tracing::debug;

use crate::{Command, Output, Result};

/// The command executor - single entry point to the database.
///
/// The Executor is **stateless**: it holds a reference to the database but
/// maintains no state of its own.
///
/// # Thread Safety
///
/// Executor is `Send + Sync` and can be shared across threads. Mutating
/// commands are serialized by the database's write lock.
///
/// # Example
///
/// ```ignore
/// use dbd_executor::{Command, Executor};
///
/// let executor = Executor::new(db);
///
/// executor.execute(Command::Write {
///     path: "/hostname".into(),
///     value: "vm1".into(),
/// })?;
///
/// let results = executor.execute_many(vec![
///     Command::Read { path: "/hostname".into() },
///     Command::Exists { path: "/settings".into() },
/// ]);
/// ```
pub struct Executor {
    db: Arc<Database>,
}

impl Executor {
    /// Create a new executor wrapping a database.
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Execute a single command.
    pub fn execute(&self, cmd: Command) -> Result<Output> {
        debug!(
            target: "dbd::executor",
            method = cmd.method_name(),
            path = cmd.path().unwrap_or_default(),
            mutation = cmd.is_mutation(),
            "Executing command"
        );

        let output = match cmd {
            Command::Ping => Output::Pong {
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            Command::Read { path } => Output::Value(self.db.read(&path)?),
            Command::ReadBinary { path } => Output::Bytes(self.db.read_binary(&path)?),
            Command::Write { path, value } => {
                self.db.write(&path, &value)?;
                Output::Unit
            }
            Command::Dump { path } => Output::Json(self.db.dump(&path)?),
            Command::Inject { path, value } => {
                self.db.inject(&path, &value)?;
                Output::Unit
            }
            Command::List { path } => Output::Keys(self.db.list(&path)?),
            Command::Rm { path } => {
                self.db.rm(&path)?;
                Output::Unit
            }
            Command::Exists { path } => Output::Bool(self.db.exists(&path)?),
        };
        Ok(output)
    }

    /// Execute multiple commands sequentially.
    ///
    /// Each command runs independently; a failure does not stop the batch.
    ///
    /// ```ignore
    /// let results = executor.execute_many(vec![cmd1, cmd2, cmd3]);
    /// // results[0] corresponds to cmd1, etc.
    /// ```
    pub fn execute_many(&self, cmds: Vec<Command>) -> Vec<Result<Output>> {
        cmds.into_iter().map(|cmd| self.execute(cmd)).collect()
    }

    /// Get a reference to the underlying database.
    pub fn database(&self) -> &Arc<Database> {
        &self.db
    }
}
