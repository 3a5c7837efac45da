//! Build targets: named task lists with dependencies and conditional gates

use crate::engine::{executor, Context, PropertyStore, TargetRegistry};
use crate::error::{ExecutionError, Result};
use crate::tasks::Task;

/// Whether a property value counts as "on" for target gating
///
/// Empty strings, `"0"`, and any capitalization of `"false"` are off;
/// everything else (including `"no"`) is on.
pub fn is_truthy(value: &str) -> bool {
    !(value.is_empty() || value.eq_ignore_ascii_case("false") || value == "0")
}

/// A named unit of work
///
/// A target carries its dependencies, optional if/unless gates, and an
/// ordered task list. Execution order is: dependencies, then gates, then
/// tasks, so a dependency can set the property a gate reads.
#[derive(Debug, Clone)]
pub struct Target {
    name: String,
    description: Option<String>,
    hidden: bool,
    depends: Vec<String>,
    if_gates: Vec<String>,
    unless_gates: Vec<String>,
    tasks: Vec<Task>,
}

impl Target {
    pub fn new(name: &str) -> Self {
        Target {
            name: name.to_string(),
            description: None,
            hidden: false,
            depends: Vec::new(),
            if_gates: Vec::new(),
            unless_gates: Vec::new(),
            tasks: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn with_depends(mut self, depends: Vec<String>) -> Self {
        self.depends = depends;
        self
    }

    /// Properties that must all exist and be truthy for the target to run
    pub fn with_if(mut self, names: Vec<String>) -> Self {
        self.if_gates = names;
        self
    }

    /// Properties that must not be set truthy for the target to run
    pub fn with_unless(mut self, names: Vec<String>) -> Self {
        self.unless_gates = names;
        self
    }

    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn depends(&self) -> &[String] {
        &self.depends
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Run this target: dependencies first, then the gate check, then tasks
    ///
    /// A closed gate skips the task list but still counts as success. Task
    /// failures abort the list and are wrapped with the target and task names.
    pub fn execute(&self, registry: &TargetRegistry, ctx: &mut Context) -> Result<()> {
        // Dependencies run before the gates: a dependency may set the very
        // property a gate reads.
        for dependency in &self.depends {
            executor::execute_single(registry, dependency, ctx)?;
        }

        if !self.gates_open(&ctx.properties)? {
            ctx.logger
                .debug(&format!("Skipping target '{}' (condition not met)", self.name));
            return Ok(());
        }

        ctx.logger.target(&self.name);

        for task in &self.tasks {
            task.execute(ctx).map_err(|source| ExecutionError::Task {
                target: self.name.clone(),
                task: task.kind().to_string(),
                source: Box::new(source),
            })?;
        }

        Ok(())
    }

    /// Evaluate the if/unless gates against the current properties
    ///
    /// Gate values are interpolated on read, so a broken reference inside a
    /// gated property surfaces as an error rather than a silent skip.
    fn gates_open(&self, properties: &PropertyStore) -> Result<bool> {
        for name in &self.if_gates {
            if !properties.exists(name) {
                return Ok(false);
            }
            if !is_truthy(&properties.get(name)?) {
                return Ok(false);
            }
        }
        for name in &self.unless_gates {
            if properties.exists(name) && is_truthy(&properties.get(name)?) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BuildError;
    use crate::tasks::PropertyTask;

    fn run(target: Target, ctx: &mut Context) -> Result<()> {
        let mut registry = TargetRegistry::new();
        let name = target.name().to_string();
        registry.add(target).unwrap();
        executor::execute_single(&registry, &name, ctx)
    }

    fn probe_task(marker: &str) -> Task {
        Task::Property(PropertyTask::new(marker, "1"))
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(""));
        assert!(!is_truthy("false"));
        assert!(!is_truthy("FALSE"));
        assert!(!is_truthy("False"));
        assert!(!is_truthy("0"));

        assert!(is_truthy("true"));
        assert!(is_truthy("1"));
        assert!(is_truthy("yes"));
        // Only the three spellings above are falsy; "no" is on.
        assert!(is_truthy("no"));
        assert!(is_truthy(" "));
        assert!(is_truthy("00"));
    }

    #[test]
    fn test_if_gate_missing_property_skips() {
        let mut ctx = Context::new();
        let target = Target::new("t")
            .with_if(vec!["flag".to_string()])
            .with_tasks(vec![probe_task("ran")]);

        run(target, &mut ctx).unwrap();
        assert!(!ctx.properties.exists("ran"));
    }

    #[test]
    fn test_if_gate_falsy_property_skips() {
        let mut ctx = Context::new();
        ctx.properties.add("flag", "false").unwrap();
        let target = Target::new("t")
            .with_if(vec!["flag".to_string()])
            .with_tasks(vec![probe_task("ran")]);

        run(target, &mut ctx).unwrap();
        assert!(!ctx.properties.exists("ran"));
    }

    #[test]
    fn test_if_gate_truthy_property_runs() {
        let mut ctx = Context::new();
        ctx.properties.add("flag", "yes").unwrap();
        let target = Target::new("t")
            .with_if(vec!["flag".to_string()])
            .with_tasks(vec![probe_task("ran")]);

        run(target, &mut ctx).unwrap();
        assert!(ctx.properties.exists("ran"));
    }

    #[test]
    fn test_if_gates_all_must_hold() {
        let mut ctx = Context::new();
        ctx.properties.add("one", "true").unwrap();
        ctx.properties.add("two", "0").unwrap();
        let target = Target::new("t")
            .with_if(vec!["one".to_string(), "two".to_string()])
            .with_tasks(vec![probe_task("ran")]);

        run(target, &mut ctx).unwrap();
        assert!(!ctx.properties.exists("ran"));
    }

    #[test]
    fn test_unless_gate_truthy_property_skips() {
        let mut ctx = Context::new();
        ctx.properties.add("skip", "1").unwrap();
        let target = Target::new("t")
            .with_unless(vec!["skip".to_string()])
            .with_tasks(vec![probe_task("ran")]);

        run(target, &mut ctx).unwrap();
        assert!(!ctx.properties.exists("ran"));
    }

    #[test]
    fn test_unless_gate_missing_or_falsy_runs() {
        let mut ctx = Context::new();
        ctx.properties.add("off", "false").unwrap();
        let target = Target::new("t")
            .with_unless(vec!["missing".to_string(), "off".to_string()])
            .with_tasks(vec![probe_task("ran")]);

        run(target, &mut ctx).unwrap();
        assert!(ctx.properties.exists("ran"));
    }

    #[test]
    fn test_gate_interpolation_error_propagates() {
        let mut ctx = Context::new();
        ctx.properties.add("flag", "${missing}").unwrap();
        let target = Target::new("t")
            .with_if(vec!["flag".to_string()])
            .with_tasks(vec![probe_task("ran")]);

        let err = run(target, &mut ctx).unwrap_err();
        assert!(matches!(err, BuildError::Property(_)));
        assert!(!ctx.properties.exists("ran"));
    }

    #[test]
    fn test_task_failure_wrapped_and_aborts() {
        let mut ctx = Context::new();
        ctx.properties.add("taken", "x").unwrap();
        let target = Target::new("deploy")
            .with_tasks(vec![probe_task("taken"), probe_task("after")]);

        let err = run(target, &mut ctx).unwrap_err();
        match err {
            BuildError::Execution(ExecutionError::Task { target, task, .. }) => {
                assert_eq!(target, "deploy");
                assert_eq!(task, "property");
            }
            other => panic!("expected task error, got {:?}", other),
        }
        // The second task never ran.
        assert!(!ctx.properties.exists("after"));
    }

    #[test]
    fn test_empty_target_succeeds() {
        let mut ctx = Context::new();
        run(Target::new("noop"), &mut ctx).unwrap();
        assert!(ctx.executor.has_executed("noop"));
    }
}
