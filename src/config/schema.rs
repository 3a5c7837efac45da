//! Build document validation
//!
//! This module checks a parsed document for problems that are cheaper to
//! report up front than to discover mid-build: empty names, a default target
//! that does not exist, tasks missing required pieces. Dependency cycles are
//! not checked here; the executor detects them on the live walk so that only
//! cycles actually reached are errors.

use crate::config::types::{Document, TargetConfig, TaskConfig};
use crate::error::{ConfigError, ConfigResult};

/// Validate a complete build document
pub fn validate_document(document: &Document) -> ConfigResult<()> {
    for name in document.properties.keys() {
        if name.is_empty() {
            return Err(ConfigError::Invalid(
                "property names must not be empty".to_string(),
            ));
        }
    }

    for (name, target) in &document.targets {
        if name.is_empty() {
            return Err(ConfigError::Invalid(
                "target names must not be empty".to_string(),
            ));
        }
        validate_target(name, target)?;
    }

    if let Some(default) = &document.default {
        if !document.targets.contains_key(default) {
            return Err(ConfigError::UnknownDefaultTarget(default.clone()));
        }
    }

    if let Some(interpreter) = &document.interpreter {
        if interpreter.is_empty() {
            return Err(ConfigError::Invalid(
                "interpreter must name a program".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validate a single target definition
pub fn validate_target(name: &str, target: &TargetConfig) -> ConfigResult<()> {
    for dependency in &target.depends {
        if dependency.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "target '{}' has an empty dependency name",
                name
            )));
        }
    }

    for gate in target.if_gates.iter().chain(&target.unless_gates) {
        if gate.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "target '{}' has an empty gate property name",
                name
            )));
        }
    }

    for task in &target.tasks {
        validate_task(name, task)?;
    }

    Ok(())
}

/// Validate a single task entry
fn validate_task(target: &str, task: &TaskConfig) -> ConfigResult<()> {
    match task {
        TaskConfig::Property(config) => {
            if config.name.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "property task in target '{}' has an empty name",
                    target
                )));
            }
        }
        TaskConfig::Mkdir(config) => {
            let dir = match config {
                crate::config::MkdirConfig::Simple(dir) => dir,
                crate::config::MkdirConfig::Detail { dir } => dir,
            };
            if dir.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "mkdir task in target '{}' has an empty directory",
                    target
                )));
            }
        }
        TaskConfig::Copy(config) => {
            if config.to.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "copy task in target '{}' has an empty destination",
                    target
                )));
            }
        }
        TaskConfig::Shell(config) => {
            let command = match config {
                crate::config::ShellConfig::Simple(command) => command,
                crate::config::ShellConfig::Detail { command, .. } => command,
            };
            if command.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "shell task in target '{}' has an empty command",
                    target
                )));
            }
        }
        TaskConfig::Echo(_) | TaskConfig::Delete(_) | TaskConfig::Chmod(_) => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse::parse_document;

    fn document(yaml: &str) -> Document {
        parse_document(yaml).unwrap()
    }

    #[test]
    fn test_valid_document() {
        let doc = document(
            r#"
default: build
properties:
  out: dist
targets:
  build:
    depends: prepare
    tasks:
      - shell: make
  prepare:
    tasks:
      - mkdir: ${out}
"#,
        );
        assert!(validate_document(&doc).is_ok());
    }

    #[test]
    fn test_unknown_default_target() {
        let doc = document(
            r#"
default: ship
targets:
  build:
    tasks: []
"#,
        );
        let result = validate_document(&doc);
        assert!(matches!(
            result,
            Err(ConfigError::UnknownDefaultTarget(name)) if name == "ship"
        ));
    }

    #[test]
    fn test_empty_target_name() {
        let doc = document(
            r#"
targets:
  "":
    tasks: []
"#,
        );
        assert!(validate_document(&doc).is_err());
    }

    #[test]
    fn test_empty_dependency_name() {
        let doc = document(
            r#"
targets:
  build:
    depends:
      - ""
    tasks: []
"#,
        );
        assert!(validate_document(&doc).is_err());
    }

    #[test]
    fn test_empty_shell_command() {
        let doc = document(
            r#"
targets:
  build:
    tasks:
      - shell: ""
"#,
        );
        assert!(validate_document(&doc).is_err());
    }

    #[test]
    fn test_empty_property_task_name() {
        let doc = document(
            r#"
targets:
  build:
    tasks:
      - property:
          name: ""
          value: x
"#,
        );
        assert!(validate_document(&doc).is_err());
    }

    #[test]
    fn test_empty_interpreter() {
        let doc = document(
            r#"
interpreter: []
targets: {}
"#,
        );
        assert!(validate_document(&doc).is_err());
    }

    #[test]
    fn test_dependency_cycles_not_checked_here() {
        // Cycles are a runtime concern; validation accepts them.
        let doc = document(
            r#"
targets:
  a:
    depends: b
  b:
    depends: a
"#,
        );
        assert!(validate_document(&doc).is_ok());
    }
}
