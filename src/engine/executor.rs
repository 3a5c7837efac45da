//! Dependency-ordered target execution
//!
//! The executor tracks two pieces of per-invocation state: the chain of
//! targets currently being entered (for cycle detection) and the set of
//! targets that have already completed (so shared dependencies run at most
//! once). The walk itself lives in [`execute_single`], which recurses through
//! [`Target::execute`](crate::engine::Target::execute) for dependencies.

use crate::engine::{Context, TargetRegistry};
use crate::error::{ExecutionError, Result};
use std::collections::HashSet;

/// Visited/active bookkeeping for a dependency walk
#[derive(Debug, Default)]
pub struct Executor {
    /// Targets entered but not yet finished, in entry order
    active: Vec<String>,

    /// Targets that completed successfully this invocation
    executed: HashSet<String>,
}

impl Executor {
    pub fn new() -> Self {
        Executor {
            active: Vec::new(),
            executed: HashSet::new(),
        }
    }

    /// Whether the target is currently being entered somewhere up the chain
    pub fn is_active(&self, name: &str) -> bool {
        self.active.iter().any(|active| active == name)
    }

    /// Whether the target already completed this invocation
    pub fn has_executed(&self, name: &str) -> bool {
        self.executed.contains(name)
    }

    /// The chain of in-progress targets, outermost first
    pub fn active_chain(&self) -> &[String] {
        &self.active
    }

    pub(crate) fn enter(&mut self, name: String) {
        self.active.push(name);
    }

    pub(crate) fn leave(&mut self) -> Option<String> {
        self.active.pop()
    }

    pub(crate) fn mark_executed(&mut self, name: String) {
        self.executed.insert(name);
    }

    /// Clear all per-invocation state
    pub fn reset(&mut self) {
        self.active.clear();
        self.executed.clear();
    }
}

/// Execute one target by name, honoring dependencies, once-only semantics,
/// and cycle detection
///
/// Unknown names fail before any state changes. A target already on the
/// active chain means the dependency graph loops back on itself; the error
/// carries the full chain from the first occurrence around to the repeat.
pub fn execute_single(registry: &TargetRegistry, name: &str, ctx: &mut Context) -> Result<()> {
    let target = registry.get(name)?;

    if ctx.executor.is_active(name) {
        let mut chain = ctx.executor.active_chain().to_vec();
        chain.push(name.to_string());
        return Err(ExecutionError::TargetCycle(chain).into());
    }

    if ctx.executor.has_executed(name) {
        ctx.logger
            .debug(&format!("Target '{}' already executed, skipping", name));
        return Ok(());
    }

    ctx.executor.enter(name.to_string());
    let previous = ctx.begin_target(name.to_string());
    let result = target.execute(registry, ctx);
    ctx.end_target(previous);
    ctx.executor.leave();

    if result.is_ok() {
        ctx.executor.mark_executed(name.to_string());
    }
    result
}

/// Execute several targets in order, stopping at the first failure
///
/// Targets already run earlier in the same invocation are not run again.
pub fn execute_multiple<S: AsRef<str>>(
    registry: &TargetRegistry,
    names: &[S],
    ctx: &mut Context,
) -> Result<()> {
    for name in names {
        execute_single(registry, name.as_ref(), ctx)?;
    }
    Ok(())
}
