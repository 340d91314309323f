//! File locators
//!
//! A locator turns a workspace root into the set of files a rule-set runs
//! against. Resolution failures are rule-set-scoped: the engine reports a
//! skip diagnostic and moves on to the next rule-set.

use crate::file::FileHandle;
use async_trait::async_trait;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Error resolving a file set
#[derive(Debug, Error)]
pub enum LocatorError {
    #[error("invalid pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Resolves a workspace root into a list of candidate files.
///
/// Implementations may return filenames only (content fetched lazily at
/// hydration) or attach content up front; the engine tolerates both.
#[async_trait]
pub trait FileLocator: Send + Sync {
    async fn resolve(&self, workspace_root: &Path) -> Result<Vec<FileHandle>, LocatorError>;
}

/// Locator matching files under the workspace root against glob patterns.
///
/// Patterns are compiled at resolve time, so a malformed pattern surfaces
/// as a [`LocatorError`] for that rule-set instead of failing registration.
#[derive(Debug, Clone, Default)]
pub struct GlobLocator {
    include: Vec<String>,
    exclude: Vec<String>,
}

impl GlobLocator {
    /// Create a locator with the given include patterns
    pub fn new(include: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            include: include.into_iter().map(Into::into).collect(),
            exclude: Vec::new(),
        }
    }

    /// Add an exclude pattern
    pub fn with_exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude.push(pattern.into());
        self
    }

    fn build_set(patterns: &[String]) -> Result<GlobSet, LocatorError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| LocatorError::Pattern {
                pattern: pattern.clone(),
                message: e.to_string(),
            })?;
            builder.add(glob);
        }
        builder.build().map_err(|e| LocatorError::Pattern {
            pattern: patterns.join(", "),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl FileLocator for GlobLocator {
    async fn resolve(&self, workspace_root: &Path) -> Result<Vec<FileHandle>, LocatorError> {
        let include = Self::build_set(&self.include)?;
        let exclude = Self::build_set(&self.exclude)?;

        let mut files: Vec<PathBuf> = Vec::new();
        for entry in WalkDir::new(workspace_root) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(workspace_root)
                .unwrap_or(entry.path());
            if include.is_match(relative) && !exclude.is_match(relative) {
                files.push(entry.path().to_path_buf());
            }
        }

        // Walk order is platform-dependent; sort for deterministic output
        files.sort();
        Ok(files.into_iter().map(FileHandle::lazy).collect())
    }
}

/// Locator returning a fixed, possibly pre-loaded file list.
///
/// Useful for callers that already know their file set, and for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticLocator {
    files: Vec<FileHandle>,
}

impl StaticLocator {
    /// Create a locator over the given handles
    pub fn new(files: impl IntoIterator<Item = FileHandle>) -> Self {
        Self {
            files: files.into_iter().collect(),
        }
    }
}

#[async_trait]
impl FileLocator for StaticLocator {
    async fn resolve(&self, _workspace_root: &Path) -> Result<Vec<FileHandle>, LocatorError> {
        Ok(self.files.clone())
    }
}
