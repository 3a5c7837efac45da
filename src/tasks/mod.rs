//! Build task implementations
//!
//! Tasks are the individual actions a target performs. The set is closed:
//! every task in a document resolves to one of the variants below at load
//! time, so an unknown task kind is a document error rather than a runtime
//! surprise.

pub mod echo;
pub mod fs;
pub mod property;
pub mod shell;

// Re-export main types
pub use echo::EchoTask;
pub use fs::{ChmodTask, CopyTask, DeleteTask, MkdirTask, SourceInput};
pub use property::PropertyTask;
pub use shell::ShellTask;

use crate::config::TaskConfig;
use crate::engine::Context;
use crate::error::{ConfigResult, Result};

/// A single executable build step
#[derive(Debug, Clone)]
pub enum Task {
    Echo(EchoTask),
    Property(PropertyTask),
    Mkdir(MkdirTask),
    Copy(CopyTask),
    Delete(DeleteTask),
    Chmod(ChmodTask),
    Shell(ShellTask),
}

impl Task {
    /// Resolve a document task into its runtime form
    pub fn from_config(config: TaskConfig) -> ConfigResult<Self> {
        Ok(match config {
            TaskConfig::Echo(c) => Task::Echo(EchoTask::from_config(c)),
            TaskConfig::Property(c) => Task::Property(PropertyTask::from_config(c)),
            TaskConfig::Mkdir(c) => Task::Mkdir(MkdirTask::from_config(c)),
            TaskConfig::Copy(c) => Task::Copy(CopyTask::from_config(c)?),
            TaskConfig::Delete(c) => Task::Delete(DeleteTask::from_config(c)?),
            TaskConfig::Chmod(c) => Task::Chmod(ChmodTask::from_config(c)?),
            TaskConfig::Shell(c) => Task::Shell(ShellTask::from_config(c)),
        })
    }

    /// The document tag of this task, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Task::Echo(_) => "echo",
            Task::Property(_) => "property",
            Task::Mkdir(_) => "mkdir",
            Task::Copy(_) => "copy",
            Task::Delete(_) => "delete",
            Task::Chmod(_) => "chmod",
            Task::Shell(_) => "shell",
        }
    }

    /// Execute the task in the given context
    pub fn execute(&self, ctx: &mut Context) -> Result<()> {
        match self {
            Task::Echo(task) => task.execute(ctx),
            Task::Property(task) => task.execute(ctx),
            Task::Mkdir(task) => task.execute(ctx),
            Task::Copy(task) => task.execute(ctx),
            Task::Delete(task) => task.execute(ctx),
            Task::Chmod(task) => task.execute(ctx),
            Task::Shell(task) => task.execute(ctx),
        }
    }
}
