//! Build graph execution engine
//!
//! This module holds the core machinery: the interpolating property store,
//! pattern matching and file selection, the target registry, and the
//! dependency-ordered executor.

pub mod context;
pub mod executor;
pub mod fileset;
pub mod matcher;
pub mod property;
pub mod registry;
pub mod target;

// Re-export main types
pub use context::*;
pub use executor::*;
pub use fileset::*;
pub use matcher::*;
pub use property::*;
pub use registry::*;
pub use target::*;
