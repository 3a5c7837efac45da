//! Execution context for build runs
//!
//! The context is the per-invocation bundle threaded through target and task
//! execution: the property store, the executor's visited/active state, the
//! logger, and a transient pointer to the target currently running.

use crate::engine::{Executor, PropertyStore};
use crate::error::Result;
use crate::ui::Logger;
use std::env;
use std::path::PathBuf;

/// Per-invocation execution state
///
/// A context is created fresh for every top-level project execution and
/// never persisted across invocations.
#[derive(Debug)]
pub struct Context {
    /// The build's shared named values; tasks may add to these mid-run
    pub properties: PropertyStore,

    /// Visited/active bookkeeping for the dependency walk
    pub executor: Executor,

    /// Diagnostics sink
    pub logger: Logger,

    /// Directory that relative paths in tasks resolve against
    pub working_dir: PathBuf,

    /// Interpreter for shell tasks (e.g. `["sh", "-c"]`)
    pub interpreter: Vec<String>,

    /// Name of the target currently executing, if any
    current_target: Option<String>,
}

impl Context {
    /// Create a context with default settings
    pub fn new() -> Self {
        Context {
            properties: PropertyStore::new(),
            executor: Executor::new(),
            logger: Logger::default(),
            working_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            interpreter: vec!["sh".to_string(), "-c".to_string()],
            current_target: None,
        }
    }

    /// Use the given property store
    pub fn with_properties(mut self, properties: PropertyStore) -> Self {
        self.properties = properties;
        self
    }

    /// Use the given working directory
    pub fn with_working_dir(mut self, dir: PathBuf) -> Self {
        self.working_dir = dir;
        self
    }

    /// Use the given logger
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Use the given shell interpreter
    pub fn with_interpreter(mut self, interpreter: Vec<String>) -> Self {
        self.interpreter = interpreter;
        self
    }

    /// Name of the target currently executing
    pub fn current_target(&self) -> Option<&str> {
        self.current_target.as_deref()
    }

    /// Interpolate a path-like value and resolve it against the working
    /// directory (absolute paths pass through)
    pub fn resolve_path(&self, value: &str) -> Result<PathBuf> {
        let resolved = self.properties.filter(value)?;
        let path = PathBuf::from(resolved);
        Ok(if path.is_absolute() {
            path
        } else {
            self.working_dir.join(path)
        })
    }

    /// Record the target that is starting, returning the previous one so the
    /// caller can restore it after nested dependency execution
    pub(crate) fn begin_target(&mut self, name: String) -> Option<String> {
        self.current_target.replace(name)
    }

    /// Restore the previously executing target
    pub(crate) fn end_target(&mut self, previous: Option<String>) {
        self.current_target = previous;
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
