//! Build document types
//!
//! This module defines the data structures that represent a bantam.yml build
//! document. Shorthand forms (a bare string where a mapping is allowed, a
//! single value where a list is allowed) are normalized here so the rest of
//! the crate sees one shape.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Top-level build document
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Document {
    /// Project name (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Project description (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Target to run when none is requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    /// Initial properties; scalar values are coerced to strings
    #[serde(default, deserialize_with = "deserialize_properties")]
    pub properties: HashMap<String, String>,

    /// Targets defined in the document
    #[serde(default)]
    pub targets: HashMap<String, TargetConfig>,

    /// Interpreter for shell tasks (e.g., ["sh", "-c"])
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpreter: Option<Vec<String>>,
}

/// A target definition
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TargetConfig {
    /// Description shown in target listings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether this target is hidden from listings
    #[serde(default)]
    pub hidden: bool,

    /// Targets that must run first
    #[serde(default, deserialize_with = "deserialize_string_list")]
    pub depends: Vec<String>,

    /// Properties that must all be set truthy for the target to run
    #[serde(
        rename = "if",
        default,
        deserialize_with = "deserialize_string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub if_gates: Vec<String>,

    /// Properties that must not be set truthy for the target to run
    #[serde(
        rename = "unless",
        default,
        deserialize_with = "deserialize_string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub unless_gates: Vec<String>,

    /// Tasks to execute, in order
    #[serde(default)]
    pub tasks: Vec<TaskConfig>,
}

/// A task entry, tagged by kind
///
/// A document writes a task as a single-key mapping (`shell: make all`,
/// `copy: {file: a, to: b}`); the key names the kind and the value holds
/// that task's configuration, so deserialization is hand-rolled below.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskConfig {
    Echo(EchoConfig),
    Property(PropertyConfig),
    Mkdir(MkdirConfig),
    Copy(CopyConfig),
    Delete(DeleteConfig),
    Chmod(ChmodConfig),
    Shell(ShellConfig),
}

impl<'de> Deserialize<'de> for TaskConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;
        use serde_yaml::Value;

        let value = Value::deserialize(deserializer)?;

        let mapping = match value {
            Value::Mapping(mapping) => mapping,
            _ => {
                return Err(D::Error::custom(
                    "a task must be a mapping with a single key naming its kind",
                ))
            }
        };

        let mut entries = mapping.into_iter();
        let (kind, body) = match (entries.next(), entries.next()) {
            (Some(entry), None) => entry,
            _ => {
                return Err(D::Error::custom(
                    "a task must be a mapping with a single key naming its kind",
                ))
            }
        };

        let kind = match kind {
            Value::String(kind) => kind,
            _ => return Err(D::Error::custom("task kinds must be strings")),
        };

        match kind.as_str() {
            "echo" => Ok(TaskConfig::Echo(
                EchoConfig::deserialize(body).map_err(D::Error::custom)?,
            )),
            "property" => Ok(TaskConfig::Property(
                PropertyConfig::deserialize(body).map_err(D::Error::custom)?,
            )),
            "mkdir" => Ok(TaskConfig::Mkdir(
                MkdirConfig::deserialize(body).map_err(D::Error::custom)?,
            )),
            "copy" => Ok(TaskConfig::Copy(
                CopyConfig::deserialize(body).map_err(D::Error::custom)?,
            )),
            "delete" => Ok(TaskConfig::Delete(
                DeleteConfig::deserialize(body).map_err(D::Error::custom)?,
            )),
            "chmod" => Ok(TaskConfig::Chmod(
                ChmodConfig::deserialize(body).map_err(D::Error::custom)?,
            )),
            "shell" => Ok(TaskConfig::Shell(
                ShellConfig::deserialize(body).map_err(D::Error::custom)?,
            )),
            other => Err(D::Error::custom(format!("unknown task kind '{}'", other))),
        }
    }
}

/// Echo task: a bare message or a mapping
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum EchoConfig {
    Simple(String),
    Detail { message: String },
}

/// Property task definition
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PropertyConfig {
    /// Property name; may contain `${name}` references
    pub name: String,

    /// Raw value; scalars are coerced to strings
    #[serde(default, deserialize_with = "deserialize_scalar_string")]
    pub value: String,
}

/// Mkdir task: a bare directory or a mapping
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum MkdirConfig {
    Simple(String),
    Detail { dir: String },
}

/// Copy task definition; exactly one of `file`/`fileset` must be given
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CopyConfig {
    /// Single source file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Source file set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fileset: Option<FileSetConfig>,

    /// Destination path (file for `file`, directory for `fileset`)
    pub to: String,
}

/// Delete task: a bare path or a mapping with `file`/`fileset`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum DeleteConfig {
    Simple(String),
    Detail {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fileset: Option<FileSetConfig>,
    },
}

/// Chmod task definition; exactly one of `file`/`fileset` must be given
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChmodConfig {
    /// Single file to change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// File set to change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fileset: Option<FileSetConfig>,

    /// Octal permission bits, e.g. "755"
    #[serde(deserialize_with = "deserialize_scalar_string")]
    pub mode: String,
}

/// Shell task: a bare command line or a mapping
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ShellConfig {
    Simple(String),
    Detail {
        /// Command line passed to the interpreter
        command: String,

        /// Working directory for the command
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dir: Option<String>,

        /// Suppress the run line and the command's stdout
        #[serde(default)]
        quiet: bool,
    },
}

/// A file set: a base directory with optional include/exclude patterns
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FileSetConfig {
    /// Base directory; may contain `${name}` references
    pub dir: String,

    /// Whitelist patterns; empty means everything is a candidate
    #[serde(
        default,
        deserialize_with = "deserialize_patterns",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub include: Vec<PatternConfig>,

    /// Blacklist patterns applied after the whitelist
    #[serde(
        default,
        deserialize_with = "deserialize_patterns",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub exclude: Vec<PatternConfig>,
}

/// One pattern entry: a bare regular expression or a `{glob: ...}` mapping
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum PatternConfig {
    Glob { glob: String },
    Pattern(String),
}

/// Custom deserializer accepting a single string or a list of strings
fn deserialize_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    use serde_yaml::Value;

    let value = Value::deserialize(deserializer)?;

    match value {
        Value::String(s) => Ok(vec![s]),
        Value::Sequence(seq) => {
            let mut items = Vec::new();
            for item in seq {
                match item {
                    Value::String(s) => items.push(s),
                    _ => return Err(D::Error::custom("list entries must be strings")),
                }
            }
            Ok(items)
        }
        Value::Null => Ok(Vec::new()),
        _ => Err(D::Error::custom("must be a string or a list of strings")),
    }
}

/// Custom deserializer for the properties mapping, coercing scalar values
/// (numbers, booleans) to their string form
fn deserialize_properties<'de, D>(deserializer: D) -> Result<HashMap<String, String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    use serde_yaml::Value;

    let value = Value::deserialize(deserializer)?;

    match value {
        Value::Mapping(mapping) => {
            let mut properties = HashMap::new();
            for (key, value) in mapping {
                let name = match key {
                    Value::String(s) => s,
                    _ => return Err(D::Error::custom("property names must be strings")),
                };
                let value = scalar_to_string(value)
                    .ok_or_else(|| D::Error::custom("property values must be scalars"))?;
                properties.insert(name, value);
            }
            Ok(properties)
        }
        Value::Null => Ok(HashMap::new()),
        _ => Err(D::Error::custom("properties must be a mapping")),
    }
}

/// Custom deserializer for pattern lists that accepts a single pattern, a
/// mapping, or a list of either
fn deserialize_patterns<'de, D>(deserializer: D) -> Result<Vec<PatternConfig>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    use serde_yaml::Value;

    let value = Value::deserialize(deserializer)?;

    match value {
        Value::String(s) => Ok(vec![PatternConfig::Pattern(s)]),
        Value::Mapping(_) => {
            let pattern = PatternConfig::deserialize(value).map_err(D::Error::custom)?;
            Ok(vec![pattern])
        }
        Value::Sequence(seq) => {
            let mut patterns = Vec::new();
            for item in seq {
                let pattern = PatternConfig::deserialize(item).map_err(D::Error::custom)?;
                patterns.push(pattern);
            }
            Ok(patterns)
        }
        Value::Null => Ok(Vec::new()),
        _ => Err(D::Error::custom("must be a pattern or a list of patterns")),
    }
}

/// Custom deserializer coercing a scalar to its string form
fn deserialize_scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    use serde_yaml::Value;

    let value = Value::deserialize(deserializer)?;
    scalar_to_string(value).ok_or_else(|| D::Error::custom("must be a scalar value"))
}

fn scalar_to_string(value: serde_yaml::Value) -> Option<String> {
    use serde_yaml::Value;

    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        _ => None,
    }
}
