//! Registry of build targets, keyed by unique name

use crate::engine::Target;
use crate::error::{ExecutionError, ExecutionResult};
use std::collections::BTreeMap;

/// All targets known to a project
///
/// Names are unique; registration keeps the first definition and rejects
/// later ones. The map is ordered so listings come out sorted by name.
#[derive(Debug, Default)]
pub struct TargetRegistry {
    targets: BTreeMap<String, Target>,
}

impl TargetRegistry {
    pub fn new() -> Self {
        TargetRegistry {
            targets: BTreeMap::new(),
        }
    }

    /// Register a target under its name
    pub fn add(&mut self, target: Target) -> ExecutionResult<()> {
        let name = target.name().to_string();
        if self.targets.contains_key(&name) {
            return Err(ExecutionError::DuplicateTarget(name));
        }
        self.targets.insert(name, target);
        Ok(())
    }

    /// Look up a target by name
    pub fn get(&self, name: &str) -> ExecutionResult<&Target> {
        self.targets
            .get(name)
            .ok_or_else(|| ExecutionError::UnknownTarget(name.to_string()))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.targets.contains_key(name)
    }

    /// Remove and return a target
    pub fn remove(&mut self, name: &str) -> ExecutionResult<Target> {
        self.targets
            .remove(name)
            .ok_or_else(|| ExecutionError::UnknownTarget(name.to_string()))
    }

    /// `(name, description)` pairs for every listable target, sorted by name
    ///
    /// Hidden targets are omitted; a missing description becomes an empty
    /// string.
    pub fn descriptions(&self) -> Vec<(String, String)> {
        self.targets
            .values()
            .filter(|target| !target.is_hidden())
            .map(|target| {
                (
                    target.name().to_string(),
                    target.description().unwrap_or_default().to_string(),
                )
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
