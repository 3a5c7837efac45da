//! Shell task: run a command line through the configured interpreter

use crate::config::ShellConfig;
use crate::engine::Context;
use crate::error::{ExecutionError, Result};
use std::process::{Command, Stdio};

/// Runs an interpolated command line via the context's interpreter
///
/// The child inherits the parent's environment and stdio; `quiet` swallows
/// its stdout and the run line. A non-zero exit status fails the task with
/// the child's exit code.
#[derive(Debug, Clone)]
pub struct ShellTask {
    command: String,
    dir: Option<String>,
    quiet: bool,
}

impl ShellTask {
    pub fn new(command: &str) -> Self {
        ShellTask {
            command: command.to_string(),
            dir: None,
            quiet: false,
        }
    }

    pub fn with_dir(mut self, dir: &str) -> Self {
        self.dir = Some(dir.to_string());
        self
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn from_config(config: ShellConfig) -> Self {
        match config {
            ShellConfig::Simple(command) => ShellTask {
                command,
                dir: None,
                quiet: false,
            },
            ShellConfig::Detail {
                command,
                dir,
                quiet,
            } => ShellTask {
                command,
                dir,
                quiet,
            },
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn execute(&self, ctx: &mut Context) -> Result<()> {
        let command_line = ctx.properties.filter(&self.command)?;

        if !self.quiet {
            ctx.logger.task("shell", &command_line);
        }

        // Determine working directory
        let working_dir = match &self.dir {
            Some(dir) => ctx.resolve_path(dir)?,
            None => ctx.working_dir.clone(),
        };

        let mut command = Command::new(&ctx.interpreter[0]);

        // Add interpreter args (e.g., "-c" for sh/bash)
        if ctx.interpreter.len() > 1 {
            command.args(&ctx.interpreter[1..]);
        }

        // Add the actual command to execute
        command.arg(&command_line);
        command.current_dir(&working_dir);

        // Set up stdio
        command.stdin(Stdio::inherit());
        if self.quiet {
            command.stdout(Stdio::null());
        } else {
            command.stdout(Stdio::inherit());
        }
        command.stderr(Stdio::inherit());

        let status = command
            .status()
            .map_err(|_| ExecutionError::CommandFailed(None))?;

        if !status.success() {
            return Err(ExecutionError::CommandFailed(status.code()).into());
        }

        Ok(())
    }
}
