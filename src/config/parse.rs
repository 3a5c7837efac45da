//! Build document parsing and discovery

use crate::config::types::Document;
use crate::error::{BuildError, ConfigError, ConfigResult};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default document file names to search for
const DOCUMENT_FILE_NAMES: &[&str] = &["bantam.yml", "bantam.yaml"];

/// Find the build document by searching current and parent directories
pub fn find_document_file() -> ConfigResult<PathBuf> {
    find_document_file_from(env::current_dir().map_err(|e| {
        ConfigError::Invalid(format!("Failed to get current directory: {}", e))
    })?)
}

/// Find the build document starting from a specific directory
pub fn find_document_file_from(start_dir: PathBuf) -> ConfigResult<PathBuf> {
    let mut current_dir = start_dir;
    let mut searched_paths = Vec::new();

    loop {
        for file_name in DOCUMENT_FILE_NAMES {
            let document_path = current_dir.join(file_name);
            searched_paths.push(document_path.display().to_string());

            if document_path.exists() && document_path.is_file() {
                return Ok(document_path);
            }
        }

        // Try parent directory
        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => {
                // Reached root without finding a document
                return Err(ConfigError::NotFound(searched_paths.join(", ")));
            }
        }
    }
}

/// Parse a build document from a path
pub fn parse_document_file(path: &Path) -> Result<Document, BuildError> {
    let contents = fs::read_to_string(path)
        .map_err(|e| ConfigError::Invalid(format!("Failed to read file: {}", e)))?;

    parse_document(&contents)
}

/// Parse a build document from a string
pub fn parse_document(yaml: &str) -> Result<Document, BuildError> {
    let document: Document = serde_yaml::from_str(yaml)?;
    Ok(document)
}

/// Parse a build document with automatic file discovery
pub fn parse_document_auto() -> Result<(Document, PathBuf), BuildError> {
    let document_path = find_document_file()?;
    let document = parse_document_file(&document_path)?;
    Ok((document, document_path))
}
