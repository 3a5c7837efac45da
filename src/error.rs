//! Error types for Bantam

use std::io;
use thiserror::Error;

/// Result type alias for Bantam operations
pub type Result<T> = std::result::Result<T, BuildError>;

/// Main error type for Bantam
#[derive(Error, Debug)]
pub enum BuildError {
    /// Build-document loading and validation errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Property store errors (duplicates, lookups, interpolation)
    #[error("Property error: {0}")]
    Property(#[from] PropertyError),

    /// Target and task execution errors
    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing errors
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Build-document parsing and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to find build document (searched: {0})")]
    NotFound(String),

    #[error("Invalid build document: {0}")]
    Invalid(String),

    #[error("Invalid pattern '{pattern}': {error}")]
    InvalidPattern { pattern: String, error: String },

    #[error("Invalid chmod mode '{0}': expected an octal number such as \"755\"")]
    InvalidMode(String),

    #[error("Default target '{0}' is not defined")]
    UnknownDefaultTarget(String),

    #[error("Task '{0}' requires exactly one of 'file' or 'fileset'")]
    InputSelection(String),
}

/// Property store errors
#[derive(Error, Debug)]
pub enum PropertyError {
    #[error("Property '{0}' is already defined")]
    Duplicate(String),

    #[error("Property '{0}' is not defined")]
    Undefined(String),

    #[error("Property cycle detected: {}", .0.join(" -> "))]
    Cycle(Vec<String>),
}

/// Target and task execution errors
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Target '{0}' is already defined")]
    DuplicateTarget(String),

    #[error("Target '{0}' is not defined")]
    UnknownTarget(String),

    #[error("Dependency cycle detected: {}", .0.join(" -> "))]
    TargetCycle(Vec<String>),

    #[error("Task '{task}' in target '{target}' failed: {source}")]
    Task {
        target: String,
        task: String,
        source: Box<BuildError>,
    },

    #[error("Command failed with exit code {0:?}")]
    CommandFailed(Option<i32>),
}

/// Specialized result type for document operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Specialized result type for property store operations
pub type PropertyResult<T> = std::result::Result<T, PropertyError>;

/// Specialized result type for execution operations
pub type ExecutionResult<T> = std::result::Result<T, ExecutionError>;
