//! Filtered file selection over a directory subtree
//!
//! A file set names a base directory (interpolated at selection time) plus an
//! optional whitelist and blacklist of [`Matcher`]s. Selection walks the
//! subtree and yields every entry the whitelist accepts and the blacklist
//! does not reject; with no whitelist everything under the base is a
//! candidate.

use crate::config::FileSetConfig;
use crate::engine::{Context, Matcher};
use crate::error::{ConfigResult, Result};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct FileSet {
    dir: String,
    whitelist: Option<Matcher>,
    blacklist: Option<Matcher>,
}

impl FileSet {
    /// A file set selecting everything under `dir`
    ///
    /// The directory may contain `${name}` references; they resolve when the
    /// set is walked, not when it is built.
    pub fn new(dir: &str) -> Self {
        FileSet {
            dir: dir.to_string(),
            whitelist: None,
            blacklist: None,
        }
    }

    pub fn with_whitelist(mut self, matcher: Matcher) -> Self {
        self.whitelist = Some(matcher);
        self
    }

    pub fn with_blacklist(mut self, matcher: Matcher) -> Self {
        self.blacklist = Some(matcher);
        self
    }

    pub fn from_config(config: &FileSetConfig) -> ConfigResult<Self> {
        Ok(FileSet {
            dir: config.dir.clone(),
            whitelist: Matcher::from_patterns(&config.include)?,
            blacklist: Matcher::from_patterns(&config.exclude)?,
        })
    }

    /// The base directory, interpolated and resolved against the context's
    /// working directory
    pub fn base_dir(&self, ctx: &Context) -> Result<PathBuf> {
        ctx.resolve_path(&self.dir)
    }

    /// Walk the subtree lazily
    ///
    /// Every call starts a fresh walk, so a set can be selected repeatedly.
    /// A missing or unreadable base directory surfaces as an I/O error from
    /// the first item.
    pub fn entries(&self, ctx: &Context) -> Result<Entries<'_>> {
        let base = self.base_dir(ctx)?;
        Ok(Entries {
            walker: WalkDir::new(&base).min_depth(1).into_iter(),
            base,
            whitelist: self.whitelist.as_ref(),
            blacklist: self.blacklist.as_ref(),
        })
    }

    /// Collect the selected entries eagerly
    pub fn select(&self, ctx: &Context) -> Result<Vec<PathBuf>> {
        self.entries(ctx)?.collect()
    }
}

/// Lazy iterator over a file set's selected entries
///
/// Symlinks are yielded as entries but never followed, and selection applies
/// to dotfiles like any other name.
pub struct Entries<'a> {
    walker: walkdir::IntoIter,
    base: PathBuf,
    whitelist: Option<&'a Matcher>,
    blacklist: Option<&'a Matcher>,
}

impl Entries<'_> {
    /// The resolved base directory this walk is rooted at
    pub fn base(&self) -> &Path {
        &self.base
    }

    fn selected(&self, path: &Path) -> bool {
        if let Some(whitelist) = self.whitelist {
            if !whitelist.matches(path, &self.base) {
                return false;
            }
        }
        if let Some(blacklist) = self.blacklist {
            if blacklist.matches(path, &self.base) {
                return false;
            }
        }
        true
    }
}

impl Iterator for Entries<'_> {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(io::Error::from(e).into())),
            };
            let path = entry.into_path();
            if self.selected(&path) {
                return Some(Ok(path));
            }
        }
    }
}
