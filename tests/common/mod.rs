//! Common test utilities

use bantam::config::parse_document;
use bantam::engine::Context;
use bantam::ui::{Logger, Verbosity};
use bantam::Project;
use std::fs;
use tempfile::TempDir;

/// Create a temporary directory with a bantam.yml file
pub fn create_test_document(content: &str) -> (TempDir, std::path::PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let document_path = temp_dir.path().join("bantam.yml");
    fs::write(&document_path, content).unwrap();
    (temp_dir, document_path)
}

/// Build a project from inline YAML, rooted in a fresh temporary directory
pub fn project_in_temp_dir(yaml: &str) -> (TempDir, Project) {
    let temp_dir = TempDir::new().unwrap();
    let document = parse_document(yaml).unwrap();
    let project = Project::from_document(document, temp_dir.path().to_path_buf()).unwrap();
    (temp_dir, project)
}

/// Build an execution context that does not write to the test output
pub fn silent_context(project: &Project) -> Context {
    project.context(Logger::new(Verbosity::Silent)).unwrap()
}
