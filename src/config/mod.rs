//! Build document parsing and validation
//!
//! This module handles parsing of bantam.yml build documents
//! and validation of document structure.

pub mod parse;
pub mod schema;
pub mod types;

// Re-export main types
pub use parse::*;
pub use schema::*;
pub use types::*;
