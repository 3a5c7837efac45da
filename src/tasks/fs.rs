//! Filesystem tasks: mkdir, copy, delete, chmod
//!
//! The copy, delete, and chmod tasks operate either on a single file or on a
//! whole [`FileSet`]; the document names exactly one of the two.

use crate::config::{ChmodConfig, CopyConfig, DeleteConfig, FileSetConfig, MkdirConfig};
use crate::engine::{Context, FileSet};
use crate::error::{ConfigError, ConfigResult, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// The input of a file-operating task
#[derive(Debug, Clone)]
pub enum SourceInput {
    /// One path, interpolated and resolved at execution time
    File(String),

    /// Every entry a file set selects
    Set(FileSet),
}

impl SourceInput {
    /// Build from the mutually exclusive `file`/`fileset` document fields
    pub fn from_parts(
        task: &str,
        file: Option<String>,
        fileset: Option<&FileSetConfig>,
    ) -> ConfigResult<Self> {
        match (file, fileset) {
            (Some(file), None) => Ok(SourceInput::File(file)),
            (None, Some(config)) => Ok(SourceInput::Set(FileSet::from_config(config)?)),
            _ => Err(ConfigError::InputSelection(task.to_string())),
        }
    }

    /// The concrete paths to operate on
    fn resolve(&self, ctx: &Context) -> Result<Vec<PathBuf>> {
        match self {
            SourceInput::File(file) => Ok(vec![ctx.resolve_path(file)?]),
            SourceInput::Set(set) => set.select(ctx),
        }
    }
}

/// Creates a directory and any missing parents
#[derive(Debug, Clone)]
pub struct MkdirTask {
    dir: String,
}

impl MkdirTask {
    pub fn new(dir: &str) -> Self {
        MkdirTask {
            dir: dir.to_string(),
        }
    }

    pub fn from_config(config: MkdirConfig) -> Self {
        match config {
            MkdirConfig::Simple(dir) => MkdirTask { dir },
            MkdirConfig::Detail { dir } => MkdirTask { dir },
        }
    }

    pub fn execute(&self, ctx: &mut Context) -> Result<()> {
        let dir = ctx.resolve_path(&self.dir)?;
        fs::create_dir_all(&dir)?;
        ctx.logger.task("mkdir", &dir.display().to_string());
        Ok(())
    }
}

/// Copies a file to a destination path, or a file set into a destination
/// directory preserving base-relative layout
#[derive(Debug, Clone)]
pub struct CopyTask {
    input: SourceInput,
    to: String,
}

impl CopyTask {
    pub fn new(input: SourceInput, to: &str) -> Self {
        CopyTask {
            input,
            to: to.to_string(),
        }
    }

    pub fn from_config(config: CopyConfig) -> ConfigResult<Self> {
        Ok(CopyTask {
            input: SourceInput::from_parts("copy", config.file, config.fileset.as_ref())?,
            to: config.to,
        })
    }

    pub fn execute(&self, ctx: &mut Context) -> Result<()> {
        let to = ctx.resolve_path(&self.to)?;
        match &self.input {
            SourceInput::File(file) => {
                let from = ctx.resolve_path(file)?;
                if let Some(parent) = to.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::copy(&from, &to)?;
                ctx.logger
                    .task("copy", &format!("{} -> {}", from.display(), to.display()));
            }
            SourceInput::Set(set) => {
                let base = set.base_dir(ctx)?;
                fs::create_dir_all(&to)?;
                let mut copied = 0usize;
                for entry in set.entries(ctx)? {
                    let entry = entry?;
                    let relative = entry.strip_prefix(&base).unwrap_or(&entry);
                    let destination = to.join(relative);
                    if entry.is_dir() {
                        fs::create_dir_all(&destination)?;
                    } else {
                        if let Some(parent) = destination.parent() {
                            fs::create_dir_all(parent)?;
                        }
                        fs::copy(&entry, &destination)?;
                        copied += 1;
                    }
                }
                ctx.logger
                    .task("copy", &format!("{} file(s) -> {}", copied, to.display()));
            }
        }
        Ok(())
    }
}

/// Deletes a file, a directory tree, or the entries of a file set
///
/// Missing paths are skipped rather than treated as errors.
#[derive(Debug, Clone)]
pub struct DeleteTask {
    input: SourceInput,
}

impl DeleteTask {
    pub fn new(input: SourceInput) -> Self {
        DeleteTask { input }
    }

    pub fn from_config(config: DeleteConfig) -> ConfigResult<Self> {
        let input = match config {
            DeleteConfig::Simple(file) => SourceInput::File(file),
            DeleteConfig::Detail { file, fileset } => {
                SourceInput::from_parts("delete", file, fileset.as_ref())?
            }
        };
        Ok(DeleteTask { input })
    }

    pub fn execute(&self, ctx: &mut Context) -> Result<()> {
        let mut removed = 0usize;
        for path in self.input.resolve(ctx)? {
            if remove_path(&path)? {
                removed += 1;
            }
        }
        ctx.logger
            .task("delete", &format!("{} path(s) removed", removed));
        Ok(())
    }
}

/// Remove whatever sits at `path`; `Ok(false)` when there is nothing there
fn remove_path(path: &Path) -> Result<bool> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        // A set lists a directory before its contents; removing the
        // directory already removed them.
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e.into()),
    };
    if metadata.is_dir() {
        fs::remove_dir_all(path)?;
    } else {
        fs::remove_file(path)?;
    }
    Ok(true)
}

/// Sets Unix permission bits on a file or on every entry of a file set
///
/// The mode comes from the document as an octal string and is parsed at load
/// time. On non-Unix platforms the task does nothing.
#[derive(Debug, Clone)]
pub struct ChmodTask {
    input: SourceInput,
    mode: u32,
}

impl ChmodTask {
    pub fn new(input: SourceInput, mode: u32) -> Self {
        ChmodTask { input, mode }
    }

    pub fn from_config(config: ChmodConfig) -> ConfigResult<Self> {
        let mode = u32::from_str_radix(&config.mode, 8)
            .map_err(|_| ConfigError::InvalidMode(config.mode.clone()))?;
        Ok(ChmodTask {
            input: SourceInput::from_parts("chmod", config.file, config.fileset.as_ref())?,
            mode,
        })
    }

    #[cfg(unix)]
    pub fn execute(&self, ctx: &mut Context) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let paths = self.input.resolve(ctx)?;
        for path in &paths {
            fs::set_permissions(path, fs::Permissions::from_mode(self.mode))?;
        }
        ctx.logger
            .task("chmod", &format!("{:o} on {} path(s)", self.mode, paths.len()));
        Ok(())
    }

    #[cfg(not(unix))]
    pub fn execute(&self, ctx: &mut Context) -> Result<()> {
        ctx.logger.debug("chmod has no effect on this platform");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ctx_in(dir: &TempDir) -> Context {
        Context::new().with_working_dir(dir.path().to_path_buf())
    }

    #[test]
    fn test_mkdir_creates_nested_directories() {
        let dir = TempDir::new().unwrap();
        let mut ctx = ctx_in(&dir);

        MkdirTask::new("a/b/c").execute(&mut ctx).unwrap();
        assert!(dir.path().join("a/b/c").is_dir());
    }

    #[test]
    fn test_mkdir_interpolates() {
        let dir = TempDir::new().unwrap();
        let mut ctx = ctx_in(&dir);
        ctx.properties.add("out", "dist").unwrap();

        MkdirTask::new("${out}/bin").execute(&mut ctx).unwrap();
        assert!(dir.path().join("dist/bin").is_dir());
    }

    #[test]
    fn test_copy_single_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("src.txt"), b"payload").unwrap();
        let mut ctx = ctx_in(&dir);

        CopyTask::new(SourceInput::File("src.txt".to_string()), "out/dst.txt")
            .execute(&mut ctx)
            .unwrap();

        let copied = fs::read(dir.path().join("out/dst.txt")).unwrap();
        assert_eq!(copied, b"payload");
    }

    #[test]
    fn test_copy_fileset_preserves_layout() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src/sub")).unwrap();
        fs::write(dir.path().join("src/top.txt"), b"1").unwrap();
        fs::write(dir.path().join("src/sub/deep.txt"), b"2").unwrap();
        fs::write(dir.path().join("src/skip.log"), b"3").unwrap();
        let mut ctx = ctx_in(&dir);

        let set = FileSet::new("src")
            .with_blacklist(crate::engine::Matcher::glob("*.log").unwrap());
        CopyTask::new(SourceInput::Set(set), "out")
            .execute(&mut ctx)
            .unwrap();

        assert!(dir.path().join("out/top.txt").is_file());
        assert!(dir.path().join("out/sub/deep.txt").is_file());
        assert!(!dir.path().join("out/skip.log").exists());
    }

    #[test]
    fn test_delete_missing_path_is_fine() {
        let dir = TempDir::new().unwrap();
        let mut ctx = ctx_in(&dir);

        DeleteTask::new(SourceInput::File("ghost.txt".to_string()))
            .execute(&mut ctx)
            .unwrap();
    }

    #[test]
    fn test_delete_file_and_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("junk.txt"), b"x").unwrap();
        fs::create_dir_all(dir.path().join("build/deep")).unwrap();
        let mut ctx = ctx_in(&dir);

        DeleteTask::new(SourceInput::File("junk.txt".to_string()))
            .execute(&mut ctx)
            .unwrap();
        DeleteTask::new(SourceInput::File("build".to_string()))
            .execute(&mut ctx)
            .unwrap();

        assert!(!dir.path().join("junk.txt").exists());
        assert!(!dir.path().join("build").exists());
    }

    #[test]
    fn test_delete_fileset_selection() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("keep.txt"), b"x").unwrap();
        fs::write(dir.path().join("drop.tmp"), b"x").unwrap();
        let mut ctx = ctx_in(&dir);

        let set = FileSet::new(".")
            .with_whitelist(crate::engine::Matcher::glob("*.tmp").unwrap());
        DeleteTask::new(SourceInput::Set(set)).execute(&mut ctx).unwrap();

        assert!(dir.path().join("keep.txt").exists());
        assert!(!dir.path().join("drop.tmp").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_chmod_applies_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("script.sh"), b"#!/bin/sh\n").unwrap();
        let mut ctx = ctx_in(&dir);

        ChmodTask::new(SourceInput::File("script.sh".to_string()), 0o755)
            .execute(&mut ctx)
            .unwrap();

        let mode = fs::metadata(dir.path().join("script.sh"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn test_source_input_arity() {
        let both = SourceInput::from_parts(
            "copy",
            Some("a".to_string()),
            Some(&FileSetConfig {
                dir: ".".to_string(),
                include: Vec::new(),
                exclude: Vec::new(),
            }),
        );
        assert!(matches!(both, Err(ConfigError::InputSelection(_))));

        let neither = SourceInput::from_parts("chmod", None, None);
        assert!(matches!(neither, Err(ConfigError::InputSelection(_))));
    }

    #[test]
    fn test_chmod_mode_parsing() {
        let bad = ChmodTask::from_config(ChmodConfig {
            file: Some("x".to_string()),
            fileset: None,
            mode: "rwxr-xr-x".to_string(),
        });
        assert!(matches!(bad, Err(ConfigError::InvalidMode(_))));

        let good = ChmodTask::from_config(ChmodConfig {
            file: Some("x".to_string()),
            fileset: None,
            mode: "644".to_string(),
        })
        .unwrap();
        assert_eq!(good.mode, 0o644);
    }
}
