//! Bantam - A declarative YAML build orchestrator
//!
//! A bantam.yml document declares properties, targets with dependencies and
//! conditional gates, and the tasks each target performs. Bantam executes the
//! requested targets in dependency order, running each target at most once
//! per invocation and interpolating `${name}` property references on the way.

// Public modules
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod project;
pub mod tasks;
pub mod ui;

// Re-export commonly used types
pub use error::{BuildError, Result};
pub use project::Project;

/// Current version of Bantam
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
