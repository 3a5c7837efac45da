//! Terminal output for build runs
//!
//! All diagnostic output goes to stderr so that task output (echo, child
//! processes) stays clean on stdout.

use colored::Colorize;

/// Verbosity levels for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Silent = 0,
    Quiet = 1,
    Normal = 2,
    Verbose = 3,
}

/// Writer for build diagnostics, carried by the execution context
#[derive(Debug, Clone)]
pub struct Logger {
    verbosity: Verbosity,
}

impl Logger {
    /// Create a logger with the given verbosity
    pub fn new(verbosity: Verbosity) -> Self {
        Logger { verbosity }
    }

    /// Current verbosity level
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Print the banner for a target that is about to run
    pub fn target(&self, name: &str) {
        if self.verbosity >= Verbosity::Normal {
            eprintln!();
            eprintln!("{}", format!("{}:", name).bold());
        }
    }

    /// Print a one-line task report, prefixed with the task kind
    pub fn task(&self, kind: &str, message: &str) {
        if self.verbosity >= Verbosity::Normal {
            eprintln!("{} {}", format!("[{}]", kind).cyan(), message);
        }
    }

    /// Print a message produced by an echo task (stdout, survives --quiet)
    pub fn echo(&self, message: &str) {
        if self.verbosity > Verbosity::Silent {
            println!("{}", message);
        }
    }

    /// Print an informational message
    pub fn info(&self, message: &str) {
        if self.verbosity >= Verbosity::Normal {
            eprintln!("{}", message);
        }
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        if self.verbosity >= Verbosity::Quiet {
            eprintln!("{} {}", "warning:".yellow().bold(), message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        if self.verbosity >= Verbosity::Quiet {
            eprintln!("{} {}", "error:".red().bold(), message);
        }
    }

    /// Print a debug message (only in verbose mode)
    pub fn debug(&self, message: &str) {
        if self.verbosity >= Verbosity::Verbose {
            eprintln!("{}", message.dimmed());
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Logger::new(Verbosity::Normal)
    }
}
