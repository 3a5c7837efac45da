//! Project assembly and the top-level execution driver
//!
//! A [`Project`] is a validated, fully resolved build document: properties
//! merged into a store, every target built with its runtime tasks and
//! registered under its unique name. It hands out fresh [`Context`]s and
//! drives the executor for a requested set of targets.

use crate::config::{parse_document_file, validate_document, Document};
use crate::engine::{executor, Context, PropertyStore, Target, TargetRegistry};
use crate::error::{ConfigResult, PropertyResult, Result};
use crate::tasks::Task;
use crate::ui::Logger;
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Project {
    /// Project name from the document
    pub name: Option<String>,

    /// Project description from the document
    pub description: Option<String>,

    /// Target to run when none is requested
    pub default_target: Option<String>,

    /// Properties declared in the document
    pub properties: PropertyStore,

    /// All targets, keyed by name
    pub registry: TargetRegistry,

    /// Interpreter override for shell tasks
    pub interpreter: Option<Vec<String>>,

    /// Directory the document lives in
    pub base_dir: PathBuf,
}

impl Project {
    /// Build a project from a parsed document
    ///
    /// Validates the document, merges its properties, and resolves every
    /// task to its runtime form. `base_dir` is the directory the document
    /// was loaded from; relative paths in tasks resolve against it.
    pub fn from_document(document: Document, base_dir: PathBuf) -> Result<Self> {
        validate_document(&document)?;

        let mut properties = PropertyStore::new();
        properties.merge(document.properties)?;

        let mut registry = TargetRegistry::new();
        for (name, config) in document.targets {
            let tasks = config
                .tasks
                .into_iter()
                .map(Task::from_config)
                .collect::<ConfigResult<Vec<_>>>()?;

            let mut target = Target::new(&name)
                .hidden(config.hidden)
                .with_depends(config.depends)
                .with_if(config.if_gates)
                .with_unless(config.unless_gates)
                .with_tasks(tasks);
            if let Some(description) = &config.description {
                target = target.with_description(description);
            }
            registry.add(target)?;
        }

        Ok(Project {
            name: document.name,
            description: document.description,
            default_target: document.default,
            properties,
            registry,
            interpreter: document.interpreter,
            base_dir,
        })
    }

    /// Load a project from a document file
    pub fn load(path: &Path) -> Result<Self> {
        let document = parse_document_file(path)?;
        let base_dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Self::from_document(document, base_dir)
    }

    /// Prepare a fresh execution context for one invocation
    ///
    /// The context gets a copy of the document properties plus the built-in
    /// ones (`basedir`, `bantam.version`, `os.name`, `os.family`, `os.arch`).
    /// Document properties win over built-ins of the same name.
    pub fn context(&self, logger: Logger) -> Result<Context> {
        let base_dir = if self.base_dir.is_absolute() {
            self.base_dir.clone()
        } else {
            env::current_dir()?.join(&self.base_dir)
        };

        let mut properties = self.properties.clone();
        seed_builtin(&mut properties, "basedir", &base_dir.display().to_string())?;
        seed_builtin(&mut properties, "bantam.version", crate::VERSION)?;
        seed_builtin(&mut properties, "os.name", env::consts::OS)?;
        seed_builtin(&mut properties, "os.family", env::consts::FAMILY)?;
        seed_builtin(&mut properties, "os.arch", env::consts::ARCH)?;

        let mut ctx = Context::new()
            .with_properties(properties)
            .with_working_dir(base_dir)
            .with_logger(logger);
        if let Some(interpreter) = &self.interpreter {
            ctx = ctx.with_interpreter(interpreter.clone());
        }
        Ok(ctx)
    }

    /// Execute the requested targets in order
    ///
    /// With no names, the document's default target runs; if the document
    /// sets no default either, a warning is printed and nothing runs.
    pub fn execute<S: AsRef<str>>(&self, names: &[S], ctx: &mut Context) -> Result<()> {
        // The context may be reused; starting over clears any walk state.
        ctx.executor.reset();

        if names.is_empty() {
            return match &self.default_target {
                Some(default) => executor::execute_single(&self.registry, default, ctx),
                None => {
                    ctx.logger
                        .warn("no targets requested and no default target is set");
                    Ok(())
                }
            };
        }

        executor::execute_multiple(&self.registry, names, ctx)
    }
}

/// Seed a built-in property unless the document already defines it
fn seed_builtin(properties: &mut PropertyStore, name: &str, value: &str) -> PropertyResult<()> {
    if !properties.exists(name) {
        properties.add(name, value)?;
    }
    Ok(())
}
